use std::sync::Arc;

use common::{
    AdvisorAnswer, ApiResponse, BackerStakeDto, CompactValue, CreatorInsightDto,
    CreatorSnapshotDto, HoldingDto, HoldingPerformanceDto, InvestmentDto, PortfolioResponse,
    SentimentScore, SimulationResponse, ValuationDisplay, ValuationResponse,
};
use compute::advisor::InvestmentAdvisor;
use compute::generator::TextGenerator;
use compute::valuation::ValuationCalculator;
use moka::future::Cache;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::handlers::{
    advisor::AdvisorQuery, formatting::CompactFormatRequest, portfolios::PortfolioRequest,
    sentiment::SentimentRequest, simulations::SimulationRequest, valuations::ValuationRequest,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Calculator configured from settings
    pub calculator: Arc<ValuationCalculator>,
    /// ISO 4217 code for currency display strings
    pub currency_code: String,
    /// Provider used for sentiment scoring and advice
    pub generator: Arc<dyn TextGenerator>,
    pub advisor: Arc<InvestmentAdvisor>,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
}

impl AppState {
    pub fn new(
        calculator: ValuationCalculator,
        currency_code: String,
        generator: Arc<dyn TextGenerator>,
        cache: Cache<String, CachedData>,
    ) -> Self {
        Self {
            calculator: Arc::new(calculator),
            currency_code,
            advisor: Arc::new(InvestmentAdvisor::new(generator.clone())),
            generator,
            cache,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("calculator", &self.calculator)
            .field("currency_code", &self.currency_code)
            .field("generator", &self.generator.name())
            .finish_non_exhaustive()
    }
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    AdvisorAnswer(String),
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Application version
    pub version: String,
    /// Name of the configured text generation provider
    pub advisor: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::valuations::create_valuation,
        crate::handlers::simulations::create_simulation,
        crate::handlers::portfolios::create_portfolio_summary,
        crate::handlers::formatting::format_compact_values,
        crate::handlers::sentiment::score_sentiment,
        crate::handlers::advisor::query_advisor,
    ),
    components(
        schemas(
            ApiResponse<ValuationResponse>,
            ApiResponse<SimulationResponse>,
            ApiResponse<PortfolioResponse>,
            ApiResponse<Vec<CompactValue>>,
            ApiResponse<SentimentScore>,
            ApiResponse<AdvisorAnswer>,
            ErrorResponse,
            HealthResponse,
            ValuationRequest,
            SimulationRequest,
            PortfolioRequest,
            CompactFormatRequest,
            SentimentRequest,
            AdvisorQuery,
            CreatorSnapshotDto,
            InvestmentDto,
            BackerStakeDto,
            ValuationDisplay,
            ValuationResponse,
            SimulationResponse,
            HoldingDto,
            HoldingPerformanceDto,
            PortfolioResponse,
            CompactValue,
            SentimentScore,
            CreatorInsightDto,
            AdvisorAnswer,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "valuations", description = "Creator valuation and investment simulation"),
        (name = "portfolios", description = "Backer portfolio endpoints"),
        (name = "formatting", description = "Display formatting helpers"),
        (name = "advisor", description = "Sentiment scoring and investment advice"),
    ),
    info(
        title = "Starvest API",
        description = "Creator investment platform API - valuations, simulations, portfolios and investment advice",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
