use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A backer's holding in one creator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HoldingDto {
    pub creator_id: String,
    pub tokens: u64,
    /// Total amount paid for the tokens
    pub cost_basis: Decimal,
    pub current_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HoldingPerformanceDto {
    pub creator_id: String,
    pub tokens: u64,
    pub cost_basis: Decimal,
    pub current_value: Decimal,
    pub return_percentage: Decimal,
    pub return_display: String,
}

/// Portfolio totals for the backer dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PortfolioResponse {
    pub total_tokens: u64,
    pub total_cost: Decimal,
    pub current_value: Decimal,
    pub gain: Decimal,
    pub total_return_percentage: Decimal,
    pub total_return_display: String,
    pub active_investments: usize,
    pub holdings: Vec<HoldingPerformanceDto>,
}
