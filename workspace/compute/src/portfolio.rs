use model::Holding;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::format::round_fixed;
use crate::valuation::{checked_product, ensure_non_negative};

/// Figures for one holding in a backer's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingPerformance {
    pub creator_id: String,
    pub tokens: u64,
    pub cost_basis: Decimal,
    pub current_value: Decimal,
    /// Percent, one decimal; `0` when nothing was paid.
    pub return_percentage: Decimal,
}

/// Aggregate view over every holding of a backer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_tokens: u64,
    pub total_cost: Decimal,
    pub current_value: Decimal,
    pub gain: Decimal,
    pub total_return_percentage: Decimal,
    pub active_investments: usize,
    pub holdings: Vec<HoldingPerformance>,
}

/// Relative change from `cost` to `value` in percent, one decimal.
///
/// A zero cost has no meaningful return and yields `0`. Returns too large
/// for a `Decimal` are rejected.
pub fn return_percentage(cost: Decimal, value: Decimal) -> Result<Decimal> {
    if cost.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let percentage = value
        .checked_sub(cost)
        .and_then(|gain| gain.checked_div(cost))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| ComputeError::invalid_argument("return percentage overflows"))?;
    Ok(round_fixed(percentage, 1))
}

/// Summarizes a backer's holdings.
#[instrument(skip(holdings), fields(num_holdings = holdings.len()))]
pub fn summarize(holdings: &[Holding]) -> Result<PortfolioSummary> {
    let mut performances = Vec::with_capacity(holdings.len());
    let mut total_tokens = 0u64;
    let mut total_cost = Decimal::ZERO;
    let mut current_value = Decimal::ZERO;

    for holding in holdings {
        ensure_non_negative("cost_basis", holding.cost_basis)?;
        ensure_non_negative("current_price", holding.current_price)?;

        let value = checked_product("holding value", Decimal::from(holding.tokens), holding.current_price)?;
        total_tokens = total_tokens
            .checked_add(holding.tokens)
            .ok_or_else(|| ComputeError::invalid_argument("total tokens overflows"))?;
        total_cost = total_cost
            .checked_add(holding.cost_basis)
            .ok_or_else(|| ComputeError::invalid_argument("total cost overflows"))?;
        current_value = current_value
            .checked_add(value)
            .ok_or_else(|| ComputeError::invalid_argument("portfolio value overflows"))?;

        performances.push(HoldingPerformance {
            creator_id: holding.creator_id.clone(),
            tokens: holding.tokens,
            cost_basis: holding.cost_basis,
            current_value: value,
            return_percentage: return_percentage(holding.cost_basis, value)?,
        });
    }
    debug!("Portfolio cost {} valued at {}", total_cost, current_value);

    let gain = current_value
        .checked_sub(total_cost)
        .ok_or_else(|| ComputeError::invalid_argument("portfolio gain overflows"))?;

    Ok(PortfolioSummary {
        total_tokens,
        total_cost,
        current_value,
        gain,
        total_return_percentage: return_percentage(total_cost, current_value)?,
        active_investments: holdings.len(),
        holdings: performances,
    })
}
