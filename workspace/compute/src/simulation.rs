//! "What if I back this creator with N tokens" previews.

use model::{Creator, Investment};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::valuation::{
    ValuationCalculator, checked_product, checked_total_tokens, ensure_non_negative,
    stake_percentage, validate_investments,
};

/// Outcome of a simulated investment. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentSimulation {
    pub creator_id: String,
    pub tokens: u64,
    /// Currency cost of buying `tokens` at the current price.
    pub cost: Decimal,
    /// Stake the backer would hold once the tokens join the pool.
    pub stake_percentage: Decimal,
    /// Projected position size, in whole tokens.
    pub projected_return_tokens: Decimal,
    pub projected_gain_tokens: Decimal,
    pub projected_roi_percentage: Decimal,
}

impl ValuationCalculator {
    /// Checks `tokens` against the configured bounds and step.
    pub fn validate_amount(&self, tokens: u64) -> Result<()> {
        let config = self.config();
        if tokens < config.min_investment || tokens > config.max_investment {
            return Err(ComputeError::invalid_argument(format!(
                "investment of {} tokens is outside the allowed range {}..={}",
                tokens, config.min_investment, config.max_investment
            )));
        }
        if tokens % config.investment_step != 0 {
            return Err(ComputeError::invalid_argument(format!(
                "investment of {} tokens is not a multiple of {}",
                tokens, config.investment_step
            )));
        }
        Ok(())
    }

    /// Previews backing `creator` with `tokens` on top of the existing pool.
    ///
    /// The backer is treated as a new entry in the pool, so the stake is
    /// measured against `total + tokens`.
    #[instrument(skip(self, creator, investments), fields(creator_id = %creator.id))]
    pub fn simulate(
        &self,
        creator: &Creator,
        investments: &[Investment],
        tokens: u64,
    ) -> Result<InvestmentSimulation> {
        ensure_non_negative("token_price", creator.token_price)?;
        validate_investments(investments)?;
        self.validate_amount(tokens)?;

        let pool_after = checked_total_tokens(investments)?
            .checked_add(tokens)
            .ok_or_else(|| ComputeError::invalid_argument("pool size overflows"))?;
        let projected = self
            .projected_return(Decimal::from(tokens))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        debug!("Pool after investment: {}, projected: {}", pool_after, projected);
        let cost = checked_product("investment cost", Decimal::from(tokens), creator.token_price)?;

        Ok(InvestmentSimulation {
            creator_id: creator.id.clone(),
            tokens,
            cost,
            stake_percentage: stake_percentage(tokens, pool_after),
            projected_return_tokens: projected,
            projected_gain_tokens: projected - Decimal::from(tokens),
            projected_roi_percentage: self.projected_roi_percentage(),
        })
    }
}
