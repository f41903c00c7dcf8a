use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===================== Inputs =====================

/// Creator snapshot as sent by clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreatorSnapshotDto {
    pub id: String,
    /// Current price of one creator token
    pub token_price: Decimal,
    #[serde(default)]
    pub followers_count: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// One backer's investment in the creator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct InvestmentDto {
    pub backer_id: String,
    pub tokens_invested: u64,
}

// ===================== Outputs =====================

/// A backer's share of the pool.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BackerStakeDto {
    pub backer_id: String,
    pub tokens_invested: u64,
    /// Percent of the pool, one decimal
    pub stake_percentage: Decimal,
    /// Value at the current token price
    pub value: Decimal,
    /// e.g. "25.0%"
    pub stake_display: String,
    /// e.g. "$500.00"
    pub value_display: String,
}

/// Pre-formatted strings for the creator profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ValuationDisplay {
    pub token_price: String,
    pub followers: String,
    pub raised_value: String,
    pub market_cap: String,
    pub volume: String,
    pub projected_roi: String,
}

/// Valuation of a creator and its backers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ValuationResponse {
    pub creator_id: String,
    pub token_price: Decimal,
    pub total_tokens_invested: u64,
    pub backer_count: usize,
    pub raised_value: Decimal,
    pub market_cap_estimate: Decimal,
    pub volume_estimate: Decimal,
    pub projected_roi_percentage: Decimal,
    /// All backers, largest first
    pub stakes: Vec<BackerStakeDto>,
    /// The first `top_backers` entries of `stakes`
    pub top_backers: Vec<BackerStakeDto>,
    pub display: ValuationDisplay,
}

/// Preview of a prospective investment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SimulationResponse {
    pub creator_id: String,
    pub tokens: u64,
    pub cost: Decimal,
    pub stake_percentage: Decimal,
    pub projected_return_tokens: Decimal,
    pub projected_gain_tokens: Decimal,
    pub projected_roi_percentage: Decimal,
    /// e.g. "$237.50"
    pub cost_display: String,
    /// e.g. "12.5%"
    pub stake_display: String,
    /// e.g. "+80%"
    pub roi_display: String,
}

/// A value and its compact rendering.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CompactValue {
    pub value: Decimal,
    pub display: String,
}
