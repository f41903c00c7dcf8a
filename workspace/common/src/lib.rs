//! Common transport-layer types shared between the service and its clients.
//! These structs mirror the handlers' request/response payloads so a client
//! can deserialize API responses without duplicating shapes.

pub mod converters;
mod advisor;
mod portfolio;
mod valuation;

pub use advisor::{AdvisorAnswer, CreatorInsightDto, SentimentScore};
pub use portfolio::{HoldingDto, HoldingPerformanceDto, PortfolioResponse};
pub use valuation::{
    BackerStakeDto, CompactValue, CreatorSnapshotDto, InvestmentDto, SimulationResponse,
    ValuationDisplay, ValuationResponse,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
