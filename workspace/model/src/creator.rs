use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a creator as seen by the valuation calculator.
///
/// `token_price` is expected to be positive. A zero price is tolerated by the
/// calculator (all values derived from it collapse to zero) while negative
/// prices are rejected at calculation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    /// Current price of a single creator token.
    pub token_price: Decimal,
    pub followers_count: u64,
    /// Informational only, never used in arithmetic.
    pub created_at: Option<DateTime<Utc>>,
}

impl Creator {
    /// Creates a creator snapshot without a creation timestamp.
    pub fn new(id: impl Into<String>, token_price: Decimal, followers_count: u64) -> Self {
        Self {
            id: id.into(),
            token_price,
            followers_count,
            created_at: None,
        }
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_creator_builder() {
        let created_at = Utc.with_ymd_and_hms(2025, 10, 3, 12, 0, 0).unwrap();
        let creator = Creator::new("alex", Decimal::new(4832, 2), 15_400).with_created_at(created_at);

        assert_eq!(creator.id, "alex");
        assert_eq!(creator.token_price, Decimal::new(4832, 2));
        assert_eq!(creator.followers_count, 15_400);
        assert_eq!(creator.created_at, Some(created_at));
    }

    #[test]
    fn test_creator_deserializes_price_from_string_and_number() {
        let from_str: Creator = serde_json::from_str(
            r#"{"id":"a","token_price":"12.85","followers_count":10,"created_at":null}"#,
        )
        .unwrap();
        let from_num: Creator = serde_json::from_str(
            r#"{"id":"a","token_price":12.85,"followers_count":10,"created_at":null}"#,
        )
        .unwrap();

        assert_eq!(from_str.token_price, Decimal::new(1285, 2));
        assert_eq!(from_str, from_num);
    }
}
