use axum::response::Json;
use axum_valid::Valid;
use common::{ApiResponse, HoldingDto, PortfolioResponse, converters::holdings_from_dtos};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::helpers::converters::portfolio_response;
use crate::helpers::responses::{ErrorReply, compute_error_response};
use crate::schemas::ErrorResponse;

/// Request body for summarizing a backer's holdings
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct PortfolioRequest {
    #[validate(length(max = 1000))]
    pub holdings: Vec<HoldingDto>,
}

/// Summarize a backer's portfolio
#[utoipa::path(
    post,
    path = "/api/v1/portfolios",
    tag = "portfolios",
    request_body = PortfolioRequest,
    responses(
        (status = 200, description = "Portfolio summarized successfully", body = ApiResponse<PortfolioResponse>),
        (status = 400, description = "Invalid holdings", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn create_portfolio_summary(
    Valid(Json(request)): Valid<Json<PortfolioRequest>>,
) -> Result<Json<ApiResponse<PortfolioResponse>>, ErrorReply> {
    trace!("Entering create_portfolio_summary function");
    debug!("Summarizing {} holdings", request.holdings.len());

    let holdings = holdings_from_dtos(request.holdings);
    let summary = compute::portfolio::summarize(&holdings)
        .map_err(|e| compute_error_response("Failed to summarize portfolio", e))?;

    info!(
        "Portfolio of {} investments valued at {}",
        summary.active_investments, summary.current_value
    );
    Ok(Json(ApiResponse::ok(
        portfolio_response(summary),
        "Portfolio summarized successfully",
    )))
}
