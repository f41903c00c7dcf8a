use axum::{extract::State, response::Json};
use axum_valid::Valid;
use common::{ApiResponse, CreatorSnapshotDto, InvestmentDto, SimulationResponse, converters::investments_from_dtos};
use model::Creator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::helpers::converters::simulation_response;
use crate::helpers::responses::{ErrorReply, compute_error_response};
use crate::schemas::{AppState, ErrorResponse};

/// Request body for previewing an investment
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct SimulationRequest {
    /// Creator to back
    pub creator: CreatorSnapshotDto,
    /// Existing investments in the creator
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub investments: Vec<InvestmentDto>,
    /// Tokens the backer wants to buy
    pub tokens: u64,
}

/// Preview an investment in a creator
#[utoipa::path(
    post,
    path = "/api/v1/simulations",
    tag = "valuations",
    request_body = SimulationRequest,
    responses(
        (status = 200, description = "Investment simulated successfully", body = ApiResponse<SimulationResponse>),
        (status = 400, description = "Amount outside the allowed range or invalid creator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn create_simulation(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<SimulationRequest>>,
) -> Result<Json<ApiResponse<SimulationResponse>>, ErrorReply> {
    trace!("Entering create_simulation function");
    debug!("Simulating {} tokens in creator {}", request.tokens, request.creator.id);

    let creator = Creator::from(request.creator);
    let investments = investments_from_dtos(request.investments);

    let simulation = state
        .calculator
        .simulate(&creator, &investments, request.tokens)
        .and_then(|simulation| simulation_response(simulation, &state.currency_code))
        .map_err(|e| compute_error_response("Failed to simulate investment", e))?;

    info!(
        "Simulated {} tokens in {} for {}",
        simulation.tokens, simulation.creator_id, simulation.cost_display
    );
    Ok(Json(ApiResponse::ok(simulation, "Investment simulated successfully")))
}
