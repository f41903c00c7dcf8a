use crate::handlers::{
    advisor::query_advisor,
    formatting::format_compact_values,
    health::health_check,
    portfolios::create_portfolio_summary,
    sentiment::score_sentiment,
    simulations::create_simulation,
    valuations::create_valuation,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Creator valuation routes
        .route("/api/v1/valuations", post(create_valuation))
        .route("/api/v1/simulations", post(create_simulation))
        // Backer portfolio routes
        .route("/api/v1/portfolios", post(create_portfolio_summary))
        // Formatting helpers
        .route("/api/v1/format/compact", post(format_compact_values))
        // Sentiment and advice
        .route("/api/v1/sentiment", post(score_sentiment))
        .route("/api/v1/advisor/query", post(query_advisor))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    with_metrics(router)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Exposes request metrics at `/metrics`.
///
/// The Prometheus recorder is process-global and can only be installed once,
/// so test builds, which create many routers, go without it.
#[cfg(not(test))]
fn with_metrics(router: Router<AppState>) -> Router<AppState> {
    use axum_prometheus::PrometheusMetricLayer;

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    router
        .route("/metrics", get(move || async move { metric_handle.render() }))
        .layer(prometheus_layer)
}

#[cfg(test)]
fn with_metrics(router: Router<AppState>) -> Router<AppState> {
    router
}
