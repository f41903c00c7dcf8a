use axum::{extract::State, response::Json};
use axum_valid::Valid;
use common::{ApiResponse, CreatorSnapshotDto, InvestmentDto, ValuationResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::helpers::converters::{DEFAULT_TOP_BACKERS, build_valuation_response};
use crate::helpers::responses::{ErrorReply, compute_error_response};
use crate::schemas::{AppState, ErrorResponse};

/// Request body for valuing a creator
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct ValuationRequest {
    /// Creator snapshot
    pub creator: CreatorSnapshotDto,
    /// Every backer's investment in the creator
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub investments: Vec<InvestmentDto>,
    /// Number of largest backers to list separately (default: 5)
    #[validate(range(min = 1, max = 100))]
    pub top_backers: Option<usize>,
}

/// Value a creator and its backers
#[utoipa::path(
    post,
    path = "/api/v1/valuations",
    tag = "valuations",
    request_body = ValuationRequest,
    responses(
        (status = 200, description = "Valuation computed successfully", body = ApiResponse<ValuationResponse>),
        (status = 400, description = "Invalid creator or investments", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn create_valuation(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<ValuationRequest>>,
) -> Result<Json<ApiResponse<ValuationResponse>>, ErrorReply> {
    trace!("Entering create_valuation function");
    debug!(
        "Valuing creator {} with {} investments",
        request.creator.id,
        request.investments.len()
    );

    let top_backers = request.top_backers.unwrap_or(DEFAULT_TOP_BACKERS);
    let valuation = build_valuation_response(
        &state.calculator,
        &state.currency_code,
        request.creator,
        request.investments,
        top_backers,
    )
    .map_err(|e| compute_error_response("Failed to compute valuation", e))?;

    info!(
        "Valuation computed for creator {}: market cap {}",
        valuation.creator_id, valuation.market_cap_estimate
    );
    Ok(Json(ApiResponse::ok(valuation, "Valuation computed successfully")))
}
