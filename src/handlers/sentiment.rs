use axum::{extract::State, response::Json};
use axum_valid::Valid;
use common::{ApiResponse, SentimentScore};
use compute::sentiment::score_post;
use model::Post;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{AppState, ErrorResponse};

/// A post to score
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct SentimentRequest {
    /// Post text
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
    /// Optional attached image
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
}

impl From<SentimentRequest> for Post {
    fn from(request: SentimentRequest) -> Self {
        Post {
            text: request.text,
            image_url: request.image_url,
        }
    }
}

/// Score the investor sentiment of a post
///
/// Always answers with a score; provider failures give a neutral 50.
#[utoipa::path(
    post,
    path = "/api/v1/sentiment",
    tag = "advisor",
    request_body = SentimentRequest,
    responses(
        (status = 200, description = "Post scored", body = ApiResponse<SentimentScore>),
        (status = 400, description = "Empty post", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn score_sentiment(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<SentimentRequest>>,
) -> Json<ApiResponse<SentimentScore>> {
    trace!("Entering score_sentiment function");
    debug!("Scoring post of {} characters", request.text.len());

    let post = Post::from(request);
    let score = score_post(state.generator.as_ref(), &post).await;

    info!("Post scored {}", score);
    Json(ApiResponse::ok(SentimentScore { score }, "Post scored"))
}
