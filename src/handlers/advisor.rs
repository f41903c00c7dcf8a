use std::hash::{DefaultHasher, Hash, Hasher};

use axum::{extract::State, response::Json};
use axum_valid::Valid;
use common::{AdvisorAnswer, ApiResponse, CreatorInsightDto, converters::insights_from_dtos};
use compute::advisor::ANALYSIS_UNAVAILABLE_ANSWER;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{AppState, CachedData, ErrorResponse};

/// A question for the investment advisor
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct AdvisorQuery {
    /// Free-form question, e.g. "Who should I invest in?"
    #[validate(length(min = 1, max = 1000))]
    pub query: String,
    /// Creators the advisor may recommend
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub creators: Vec<CreatorInsightDto>,
}

impl AdvisorQuery {
    fn cache_key(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.query.trim().to_lowercase().hash(&mut hasher);
        self.creators.hash(&mut hasher);
        format!("advisor_{:016x}", hasher.finish())
    }
}

/// Ask the investment advisor
#[utoipa::path(
    post,
    path = "/api/v1/advisor/query",
    tag = "advisor",
    request_body = AdvisorQuery,
    responses(
        (status = 200, description = "Advisor answered", body = ApiResponse<AdvisorAnswer>),
        (status = 400, description = "Empty query", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn query_advisor(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<AdvisorQuery>>,
) -> Json<ApiResponse<AdvisorAnswer>> {
    trace!("Entering query_advisor function");
    debug!(
        "Advisor query of {} characters over {} creators",
        request.query.len(),
        request.creators.len()
    );

    // Check cache first
    let cache_key = request.cache_key();
    if let Some(CachedData::AdvisorAnswer(answer)) = state.cache.get(&cache_key).await {
        debug!("Advisor answer served from cache");
        return Json(ApiResponse::ok(
            AdvisorAnswer { answer, cached: true },
            "Advisor answer retrieved from cache",
        ));
    }

    let creators = insights_from_dtos(request.creators);
    let answer = state.advisor.answer(&request.query, &creators).await;

    if answer == ANALYSIS_UNAVAILABLE_ANSWER {
        warn!("Advisor could not analyze creators, answer not cached");
    } else {
        state
            .cache
            .insert(cache_key, CachedData::AdvisorAnswer(answer.clone()))
            .await;
        info!("Advisor answer generated and cached");
    }

    Json(ApiResponse::ok(
        AdvisorAnswer { answer, cached: false },
        "Advisor answered successfully",
    ))
}
