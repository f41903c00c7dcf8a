use std::fs;

use anyhow::{Context, Result};
use common::{CreatorSnapshotDto, InvestmentDto, ValuationResponse};
use serde::Deserialize;
use tracing::{debug, info, trace};

use crate::config::{build_calculator, load_settings};
use crate::helpers::converters::{DEFAULT_TOP_BACKERS, build_valuation_response};

/// Snapshot file read by the `valuate` command.
#[derive(Debug, Deserialize)]
struct Snapshot {
    creator: CreatorSnapshotDto,
    #[serde(default)]
    investments: Vec<InvestmentDto>,
    top_backers: Option<usize>,
}

pub fn valuate(input_path: &str, config_path: Option<&str>) -> Result<()> {
    trace!("Entering valuate function");
    let valuation = valuate_file(input_path, config_path)?;
    println!("{}", serde_json::to_string_pretty(&valuation)?);
    Ok(())
}

fn valuate_file(input_path: &str, config_path: Option<&str>) -> Result<ValuationResponse> {
    let settings = load_settings(config_path)?;
    let calculator = build_calculator(&settings)?;

    debug!("Reading snapshot from {}", input_path);
    let raw = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read snapshot file {}", input_path))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid snapshot in {}", input_path))?;

    let valuation = build_valuation_response(
        &calculator,
        &settings.currency_code,
        snapshot.creator,
        snapshot.investments,
        snapshot.top_backers.unwrap_or(DEFAULT_TOP_BACKERS),
    )?;
    info!(
        "Valued creator {} with {} backers",
        valuation.creator_id, valuation.backer_count
    );
    Ok(valuation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;

    fn snapshot_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_valuate_snapshot_file() {
        let file = snapshot_file(
            r#"{
                "creator": {"id": "maya", "token_price": "5.00", "followers_count": 2400000, "created_at": null},
                "investments": [
                    {"backer_id": "a", "tokens_invested": 50},
                    {"backer_id": "b", "tokens_invested": 150}
                ]
            }"#,
        );

        let valuation = valuate_file(file.path().to_str().unwrap(), None).unwrap();
        assert_eq!(valuation.total_tokens_invested, 200);
        assert_eq!(valuation.raised_value, Decimal::from(1000));
        assert_eq!(valuation.market_cap_estimate, Decimal::from(50_000));
        assert_eq!(valuation.display.followers, "2.4M");
        assert_eq!(valuation.stakes[0].stake_percentage, Decimal::new(750, 1));
    }

    #[test]
    fn test_valuate_rejects_negative_price() {
        let file = snapshot_file(
            r#"{"creator": {"id": "x", "token_price": "-1", "created_at": null}, "investments": []}"#,
        );
        let err = valuate_file(file.path().to_str().unwrap(), None).unwrap_err();
        assert!(err.to_string().contains("token_price"));
    }

    #[test]
    fn test_valuate_missing_file() {
        assert!(valuate_file("/nonexistent/snapshot.json", None).is_err());
    }
}
