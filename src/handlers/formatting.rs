use axum::response::Json;
use axum_valid::Valid;
use common::{ApiResponse, CompactValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::helpers::converters::compact_value;
use crate::helpers::responses::{ErrorReply, compute_error_response};
use crate::schemas::ErrorResponse;

/// Request body for compact number formatting
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CompactFormatRequest {
    /// Non-negative values, e.g. follower counts or market caps
    #[validate(length(min = 1, max = 1000))]
    pub values: Vec<Decimal>,
}

/// Format numbers as `1.5k` / `2.4M`
#[utoipa::path(
    post,
    path = "/api/v1/format/compact",
    tag = "formatting",
    request_body = CompactFormatRequest,
    responses(
        (status = 200, description = "Values formatted successfully", body = ApiResponse<Vec<CompactValue>>),
        (status = 400, description = "Negative or missing values", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn format_compact_values(
    Valid(Json(request)): Valid<Json<CompactFormatRequest>>,
) -> Result<Json<ApiResponse<Vec<CompactValue>>>, ErrorReply> {
    trace!("Entering format_compact_values function");
    debug!("Formatting {} values", request.values.len());

    let formatted = request
        .values
        .into_iter()
        .map(compact_value)
        .collect::<compute::error::Result<Vec<_>>>()
        .map_err(|e| compute_error_response("Failed to format values", e))?;

    Ok(Json(ApiResponse::ok(formatted, "Values formatted successfully")))
}
