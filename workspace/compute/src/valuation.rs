//! Valuation arithmetic for a single creator.
//!
//! The free functions are the primitive operations; [`ValuationCalculator`]
//! binds them to a [`ValuationConfig`] so that no call site carries its own
//! multiplier.

use std::collections::HashSet;

use model::{Creator, Investment};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};
use crate::format::round_fixed;

/// Multipliers and investment bounds used by every valuation.
///
/// The market-cap multiplier stands in for an assumed total token supply and
/// the ROI multiplier for a fixed appreciation factor. Both are heuristics for
/// display, not a financial model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    pub market_cap_multiplier: Decimal,
    pub volume_multiplier: Decimal,
    pub roi_multiplier: Decimal,
    /// Smallest amount of tokens accepted by a simulation.
    pub min_investment: u64,
    /// Largest amount of tokens accepted by a simulation.
    pub max_investment: u64,
    /// Simulated amounts must be a multiple of this step.
    pub investment_step: u64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            market_cap_multiplier: Decimal::from(10_000),
            volume_multiplier: Decimal::from(2_500),
            roi_multiplier: Decimal::new(18, 1),
            min_investment: 10,
            max_investment: 500,
            investment_step: 10,
        }
    }
}

impl ValuationConfig {
    /// Checks that the configuration can be used for calculations.
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("market_cap_multiplier", self.market_cap_multiplier)?;
        ensure_non_negative("volume_multiplier", self.volume_multiplier)?;
        ensure_non_negative("roi_multiplier", self.roi_multiplier)?;
        if self
            .roi_multiplier
            .checked_sub(Decimal::ONE)
            .and_then(|gain| gain.checked_mul(Decimal::ONE_HUNDRED))
            .is_none()
        {
            return Err(ComputeError::invalid_argument("roi_multiplier is too large"));
        }
        if self.investment_step == 0 {
            return Err(ComputeError::invalid_argument("investment_step must be positive"));
        }
        if self.min_investment > self.max_investment {
            return Err(ComputeError::invalid_argument(format!(
                "min_investment ({}) exceeds max_investment ({})",
                self.min_investment, self.max_investment
            )));
        }
        Ok(())
    }
}

pub(crate) fn ensure_non_negative(name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(ComputeError::invalid_argument(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// `a * b`, rejecting results a `Decimal` cannot represent.
pub(crate) fn checked_product(name: &str, a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| ComputeError::invalid_argument(format!("{} overflows", name)))
}

/// Sum of tokens across all investments, `0` for an empty slice.
///
/// Saturates at `u64::MAX`; use [`checked_total_tokens`] where an exact total matters.
pub fn total_tokens_invested(investments: &[Investment]) -> u64 {
    investments
        .iter()
        .fold(0u64, |sum, investment| sum.saturating_add(investment.tokens_invested))
}

/// Exact sum of tokens across all investments.
pub fn checked_total_tokens(investments: &[Investment]) -> Result<u64> {
    investments.iter().try_fold(0u64, |sum, investment| {
        sum.checked_add(investment.tokens_invested)
            .ok_or_else(|| ComputeError::invalid_argument("total tokens overflows"))
    })
}

/// Share of the pool held by one backer, in percent with one decimal.
///
/// An empty pool yields `0` rather than an undefined value.
pub fn stake_percentage(investor_tokens: u64, total_tokens_invested: u64) -> Decimal {
    if total_tokens_invested == 0 {
        return Decimal::ZERO;
    }
    let share = Decimal::from(investor_tokens) * Decimal::ONE_HUNDRED
        / Decimal::from(total_tokens_invested);
    round_fixed(share, 1)
}

/// Currency value of the invested tokens at the given price.
pub fn raised_value(total_tokens_invested: u64, token_price: Decimal) -> Result<Decimal> {
    ensure_non_negative("token_price", token_price)?;
    checked_product("raised value", Decimal::from(total_tokens_invested), token_price)
}

/// Price times an assumed token supply.
pub fn market_cap_estimate(token_price: Decimal, multiplier: Decimal) -> Result<Decimal> {
    ensure_non_negative("token_price", token_price)?;
    ensure_non_negative("multiplier", multiplier)?;
    checked_product("market cap", token_price, multiplier)
}

/// Amount times a fixed appreciation factor.
pub fn projected_return(investment_amount: Decimal, return_multiplier: Decimal) -> Result<Decimal> {
    ensure_non_negative("investment_amount", investment_amount)?;
    ensure_non_negative("return_multiplier", return_multiplier)?;
    checked_product("projected return", investment_amount, return_multiplier)
}

/// Rejects investment sets with duplicated backers or empty positions.
pub fn validate_investments(investments: &[Investment]) -> Result<()> {
    let mut seen = HashSet::with_capacity(investments.len());
    for investment in investments {
        if investment.tokens_invested == 0 {
            return Err(ComputeError::invalid_argument(format!(
                "backer '{}' has no tokens invested",
                investment.backer_id
            )));
        }
        if !seen.insert(investment.backer_id.as_str()) {
            return Err(ComputeError::invalid_argument(format!(
                "backer '{}' appears more than once",
                investment.backer_id
            )));
        }
    }
    Ok(())
}

/// One backer's position within a creator's pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackerStake {
    pub backer_id: String,
    pub tokens_invested: u64,
    pub stake_percentage: Decimal,
    /// Value of the position at the current token price.
    pub value: Decimal,
}

/// Every derived figure for one creator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationSummary {
    pub creator_id: String,
    pub token_price: Decimal,
    pub followers_count: u64,
    pub total_tokens_invested: u64,
    pub backer_count: usize,
    pub raised_value: Decimal,
    pub market_cap_estimate: Decimal,
    pub volume_estimate: Decimal,
    pub projected_roi_percentage: Decimal,
    /// Sorted by tokens invested, largest first; ties by backer id.
    pub stakes: Vec<BackerStake>,
}

impl ValuationSummary {
    /// The `n` largest backers.
    pub fn top_backers(&self, n: usize) -> &[BackerStake] {
        &self.stakes[..n.min(self.stakes.len())]
    }
}

/// Applies a [`ValuationConfig`] to creator snapshots.
#[derive(Debug, Clone, Default)]
pub struct ValuationCalculator {
    config: ValuationConfig,
}

impl ValuationCalculator {
    /// Creates a calculator after checking the configuration.
    pub fn new(config: ValuationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn market_cap(&self, token_price: Decimal) -> Result<Decimal> {
        market_cap_estimate(token_price, self.config.market_cap_multiplier)
    }

    /// Trading volume heuristic shown next to the market cap.
    pub fn volume_estimate(&self, token_price: Decimal) -> Result<Decimal> {
        ensure_non_negative("token_price", token_price)?;
        checked_product("volume", token_price, self.config.volume_multiplier)
    }

    pub fn projected_return(&self, investment_amount: Decimal) -> Result<Decimal> {
        projected_return(investment_amount, self.config.roi_multiplier)
    }

    /// Projected gain in percent implied by the ROI multiplier (`1.8` gives `80`).
    ///
    /// Cannot overflow: [`ValuationConfig::validate`] rejects multipliers that would.
    pub fn projected_roi_percentage(&self) -> Decimal {
        (self.config.roi_multiplier - Decimal::ONE) * Decimal::ONE_HUNDRED
    }

    /// Value of a single backer's tokens at the given price.
    pub fn backer_value(&self, tokens: u64, token_price: Decimal) -> Result<Decimal> {
        raised_value(tokens, token_price)
    }

    /// Computes every derived figure for a creator and its backers.
    #[instrument(skip(self, creator, investments), fields(creator_id = %creator.id, num_investments = investments.len()))]
    pub fn summarize(&self, creator: &Creator, investments: &[Investment]) -> Result<ValuationSummary> {
        trace!("Entering summarize");
        ensure_non_negative("token_price", creator.token_price)?;
        validate_investments(investments)?;

        let total = checked_total_tokens(investments)?;
        debug!("Total tokens invested: {}", total);

        let mut stakes = investments
            .iter()
            .map(|investment| {
                Ok(BackerStake {
                    backer_id: investment.backer_id.clone(),
                    tokens_invested: investment.tokens_invested,
                    stake_percentage: stake_percentage(investment.tokens_invested, total),
                    value: self.backer_value(investment.tokens_invested, creator.token_price)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        stakes.sort_by(|a, b| {
            b.tokens_invested
                .cmp(&a.tokens_invested)
                .then_with(|| a.backer_id.cmp(&b.backer_id))
        });

        Ok(ValuationSummary {
            creator_id: creator.id.clone(),
            token_price: creator.token_price,
            followers_count: creator.followers_count,
            total_tokens_invested: total,
            backer_count: investments.len(),
            raised_value: raised_value(total, creator.token_price)?,
            market_cap_estimate: self.market_cap(creator.token_price)?,
            volume_estimate: self.volume_estimate(creator.token_price)?,
            projected_roi_percentage: self.projected_roi_percentage(),
            stakes,
        })
    }
}
