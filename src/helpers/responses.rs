use axum::{http::StatusCode, response::Json};
use compute::error::ComputeError;
use tracing::error;

use crate::schemas::ErrorResponse;

pub type ErrorReply = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> ErrorReply {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Maps a compute failure to an HTTP error: bad input is the caller's fault,
/// anything else is ours.
pub fn compute_error_response(context: &str, err: ComputeError) -> ErrorReply {
    error!("{}: {}", context, err);
    match err {
        ComputeError::InvalidArgument(message) => {
            error_response(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", message)
        }
        ComputeError::Provider(message) => {
            error_response(StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", message)
        }
        other => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            format!("{}: {}", context, other),
        ),
    }
}
