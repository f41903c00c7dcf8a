//! Display formatting shared by every creator and portfolio view.
//!
//! All helpers round half away from zero, matching how the figures have
//! always been shown to users (`1.25` becomes `1.3`, not `1.2`).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

use crate::error::{ComputeError, Result};

const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Rounds `value` to exactly `decimals` places so that `Display` always
/// prints that many digits (`1` becomes `1.0` for one decimal).
pub fn round_fixed(value: Decimal, decimals: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    rounded
}

/// Converts a float coming from an untyped source into a `Decimal`.
///
/// NaN, infinities and magnitudes a `Decimal` cannot hold are rejected with
/// [`ComputeError::InvalidArgument`].
pub fn decimal_from_f64(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(ComputeError::invalid_argument(format!(
            "expected a finite number, got {}",
            value
        )));
    }
    Decimal::from_str(&value.to_string()).map_err(|e| {
        ComputeError::invalid_argument(format!("{} is out of the supported range: {}", value, e))
    })
}

/// Formats a non-negative number with a `k` or `M` suffix.
///
/// Values from one thousand get one decimal place and a `k`, values from one
/// million a `M`; smaller values are printed as they are.
///
/// ```
/// use compute::format::format_compact;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_compact(Decimal::from(1500)).unwrap(), "1.5k");
/// assert_eq!(format_compact(Decimal::from(2_400_000)).unwrap(), "2.4M");
/// assert_eq!(format_compact(Decimal::from(999)).unwrap(), "999");
/// ```
pub fn format_compact(value: Decimal) -> Result<String> {
    if value < Decimal::ZERO {
        return Err(ComputeError::invalid_argument(format!(
            "cannot format negative value {} in compact form",
            value
        )));
    }
    Ok(compact(value))
}

/// Compact form of a count, e.g. followers or backers.
pub fn format_compact_count(count: u64) -> String {
    compact(Decimal::from(count))
}

fn compact(value: Decimal) -> String {
    if value >= MILLION {
        format!("{}M", round_fixed(value / MILLION, 1))
    } else if value >= Decimal::ONE_THOUSAND {
        format!("{}k", round_fixed(value / Decimal::ONE_THOUSAND, 1))
    } else {
        value.normalize().to_string()
    }
}

/// Formats an amount in the given ISO 4217 currency, e.g. `$2,000.00`.
pub fn format_currency(amount: Decimal, currency_code: &str) -> Result<String> {
    let currency = iso::find(currency_code).ok_or_else(|| {
        ComputeError::invalid_argument(format!("unknown currency code '{}'", currency_code))
    })?;
    Ok(Money::from_decimal(amount, currency).to_string())
}

/// Formats a percentage with a fixed number of decimals, e.g. `25.0%`.
pub fn format_percentage(value: Decimal, decimals: u32) -> String {
    format!("{}%", round_fixed(value, decimals))
}

/// Like [`format_percentage`] but always carries a sign, e.g. `+80%`.
pub fn format_signed_percentage(value: Decimal, decimals: u32) -> String {
    let rounded = round_fixed(value, decimals);
    if rounded >= Decimal::ZERO {
        format!("+{}%", rounded)
    } else {
        format!("{}%", rounded)
    }
}
