use common::{
    BackerStakeDto, CompactValue, CreatorSnapshotDto, HoldingPerformanceDto, InvestmentDto,
    PortfolioResponse, SimulationResponse, ValuationDisplay, ValuationResponse,
    converters::investments_from_dtos,
};
use compute::error::Result;
use compute::format::{
    format_compact, format_compact_count, format_currency, format_percentage,
    format_signed_percentage,
};
use compute::portfolio::PortfolioSummary;
use compute::simulation::InvestmentSimulation;
use compute::valuation::{BackerStake, ValuationCalculator, ValuationSummary};
use model::Creator;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Backers shown on the creator dashboard when the caller does not ask for a
/// different number.
pub const DEFAULT_TOP_BACKERS: usize = 5;

/// Runs a valuation for DTO input and converts the result for the API.
#[instrument(skip(calculator, creator, investments), fields(creator_id = %creator.id))]
pub fn build_valuation_response(
    calculator: &ValuationCalculator,
    currency_code: &str,
    creator: CreatorSnapshotDto,
    investments: Vec<InvestmentDto>,
    top_backers: usize,
) -> Result<ValuationResponse> {
    let creator = Creator::from(creator);
    let investments = investments_from_dtos(investments);
    let summary = calculator.summarize(&creator, &investments)?;
    debug!("Valuation summary computed for {} backers", summary.backer_count);
    valuation_response(&summary, top_backers, currency_code)
}

pub fn valuation_response(
    summary: &ValuationSummary,
    top_backers: usize,
    currency_code: &str,
) -> Result<ValuationResponse> {
    let stakes = summary
        .stakes
        .iter()
        .map(|stake| backer_stake_dto(stake, currency_code))
        .collect::<Result<Vec<_>>>()?;
    let top = stakes[..top_backers.min(stakes.len())].to_vec();

    let display = ValuationDisplay {
        token_price: format_currency(summary.token_price, currency_code)?,
        followers: format_compact_count(summary.followers_count),
        raised_value: format_currency(summary.raised_value, currency_code)?,
        market_cap: format_currency(summary.market_cap_estimate, currency_code)?,
        volume: format_currency(summary.volume_estimate, currency_code)?,
        projected_roi: format_signed_percentage(summary.projected_roi_percentage, 0),
    };

    Ok(ValuationResponse {
        creator_id: summary.creator_id.clone(),
        token_price: summary.token_price,
        total_tokens_invested: summary.total_tokens_invested,
        backer_count: summary.backer_count,
        raised_value: summary.raised_value,
        market_cap_estimate: summary.market_cap_estimate,
        volume_estimate: summary.volume_estimate,
        projected_roi_percentage: summary.projected_roi_percentage,
        stakes,
        top_backers: top,
        display,
    })
}

fn backer_stake_dto(stake: &BackerStake, currency_code: &str) -> Result<BackerStakeDto> {
    Ok(BackerStakeDto {
        backer_id: stake.backer_id.clone(),
        tokens_invested: stake.tokens_invested,
        stake_percentage: stake.stake_percentage,
        value: stake.value,
        stake_display: format_percentage(stake.stake_percentage, 1),
        value_display: format_currency(stake.value, currency_code)?,
    })
}

pub fn simulation_response(
    simulation: InvestmentSimulation,
    currency_code: &str,
) -> Result<SimulationResponse> {
    Ok(SimulationResponse {
        cost_display: format_currency(simulation.cost, currency_code)?,
        stake_display: format_percentage(simulation.stake_percentage, 1),
        roi_display: format_signed_percentage(simulation.projected_roi_percentage, 0),
        creator_id: simulation.creator_id,
        tokens: simulation.tokens,
        cost: simulation.cost,
        stake_percentage: simulation.stake_percentage,
        projected_return_tokens: simulation.projected_return_tokens,
        projected_gain_tokens: simulation.projected_gain_tokens,
        projected_roi_percentage: simulation.projected_roi_percentage,
    })
}

pub fn portfolio_response(summary: PortfolioSummary) -> PortfolioResponse {
    let holdings = summary
        .holdings
        .into_iter()
        .map(|holding| HoldingPerformanceDto {
            return_display: format_signed_percentage(holding.return_percentage, 1),
            creator_id: holding.creator_id,
            tokens: holding.tokens,
            cost_basis: holding.cost_basis,
            current_value: holding.current_value,
            return_percentage: holding.return_percentage,
        })
        .collect();

    PortfolioResponse {
        total_tokens: summary.total_tokens,
        total_cost: summary.total_cost,
        current_value: summary.current_value,
        gain: summary.gain,
        total_return_display: format_signed_percentage(summary.total_return_percentage, 1),
        total_return_percentage: summary.total_return_percentage,
        active_investments: summary.active_investments,
        holdings,
    }
}

pub fn compact_value(value: Decimal) -> Result<CompactValue> {
    Ok(CompactValue {
        display: format_compact(value)?,
        value,
    })
}
