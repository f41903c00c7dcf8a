pub mod advisor;
pub mod error;
pub mod format;
pub mod generator;
pub mod portfolio;
pub mod sentiment;
pub mod simulation;
pub mod valuation;

use valuation::{ValuationCalculator, ValuationConfig};

/// Returns a calculator with the platform's standard multipliers.
///
/// Market cap is price times 10,000 and projected returns use a fixed 1.8x
/// multiplier. Services that load their own configuration should build a
/// [`ValuationCalculator`] from it instead.
pub fn default_calculator() -> ValuationCalculator {
    ValuationCalculator::default()
}

/// Builds a calculator from the given configuration, falling back to
/// [`default_calculator`] when none is provided.
pub fn calculator_from(config: Option<ValuationConfig>) -> error::Result<ValuationCalculator> {
    match config {
        Some(config) => ValuationCalculator::new(config),
        None => Ok(default_calculator()),
    }
}
