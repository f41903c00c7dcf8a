#[cfg(test)]
mod integration_tests {
    use std::sync::Arc;

    use crate::test_utils::test_utils::{
        StubGenerator, init_test_tracing, setup_test_app, setup_test_app_with,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::{
        AdvisorAnswer, ApiResponse, CompactValue, PortfolioResponse, SentimentScore,
        SimulationResponse, ValuationResponse,
    };
    use compute::advisor::{ANALYSIS_UNAVAILABLE_ANSWER, PLATFORM_INFO_ANSWER};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn server() -> TestServer {
        TestServer::new(setup_test_app()).unwrap()
    }

    fn creator(price: &str) -> serde_json::Value {
        json!({
            "id": "sarah",
            "token_price": price,
            "followers_count": 15400,
            "created_at": "2024-03-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let _guard = init_test_tracing();
        let server = server();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["advisor"], "stub");
    }

    #[tokio::test]
    async fn test_valuation_of_two_backers() {
        let _guard = init_test_tracing();
        let server = server();

        let response = server
            .post("/api/v1/valuations")
            .json(&json!({
                "creator": creator("10"),
                "investments": [
                    {"backer_id": "small", "tokens_invested": 50},
                    {"backer_id": "large", "tokens_invested": 150}
                ]
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<ValuationResponse> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Valuation computed successfully");

        let valuation = body.data;
        assert_eq!(valuation.total_tokens_invested, 200);
        assert_eq!(valuation.backer_count, 2);
        assert_eq!(valuation.raised_value, Decimal::from(2000));
        assert_eq!(valuation.market_cap_estimate, Decimal::from(100_000));
        assert_eq!(valuation.volume_estimate, Decimal::from(25_000));
        assert_eq!(valuation.projected_roi_percentage, Decimal::from(80));

        let small = valuation.stakes.iter().find(|s| s.backer_id == "small").unwrap();
        assert_eq!(small.stake_percentage, Decimal::new(250, 1));
        assert_eq!(small.stake_display, "25.0%");
        assert_eq!(small.value_display, "$500.00");
        assert_eq!(valuation.stakes[0].backer_id, "large");

        assert_eq!(valuation.display.raised_value, "$2,000.00");
        assert_eq!(valuation.display.market_cap, "$100,000.00");
        assert_eq!(valuation.display.followers, "15.4k");
        assert_eq!(valuation.display.projected_roi, "+80%");
    }

    #[tokio::test]
    async fn test_valuation_with_zero_price() {
        let server = server();

        let response = server
            .post("/api/v1/valuations")
            .json(&json!({
                "creator": creator("0"),
                "investments": [{"backer_id": "a", "tokens_invested": 10}]
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let valuation = response.json::<ApiResponse<ValuationResponse>>().data;
        assert_eq!(valuation.raised_value, Decimal::ZERO);
        assert_eq!(valuation.market_cap_estimate, Decimal::ZERO);
        assert_eq!(valuation.display.raised_value, "$0.00");
        assert_eq!(valuation.stakes[0].stake_percentage, Decimal::ONE_HUNDRED);
    }

    #[tokio::test]
    async fn test_valuation_without_investments() {
        let server = server();

        let response = server
            .post("/api/v1/valuations")
            .json(&json!({ "creator": creator("12.5") }))
            .await;

        response.assert_status(StatusCode::OK);
        let valuation = response.json::<ApiResponse<ValuationResponse>>().data;
        assert_eq!(valuation.total_tokens_invested, 0);
        assert!(valuation.stakes.is_empty());
        assert!(valuation.top_backers.is_empty());
    }

    #[tokio::test]
    async fn test_valuation_limits_top_backers() {
        let server = server();
        let investments: Vec<_> = (1..=8)
            .map(|i| json!({"backer_id": format!("backer-{}", i), "tokens_invested": i * 10}))
            .collect();

        let response = server
            .post("/api/v1/valuations")
            .json(&json!({ "creator": creator("1"), "investments": investments, "top_backers": 3 }))
            .await;

        response.assert_status(StatusCode::OK);
        let valuation = response.json::<ApiResponse<ValuationResponse>>().data;
        assert_eq!(valuation.stakes.len(), 8);
        let top: Vec<_> = valuation.top_backers.iter().map(|s| s.backer_id.as_str()).collect();
        assert_eq!(top, vec!["backer-8", "backer-7", "backer-6"]);
    }

    #[tokio::test]
    async fn test_valuation_rejects_negative_price() {
        let server = server();

        let response = server
            .post("/api/v1/valuations")
            .json(&json!({ "creator": creator("-1"), "investments": [] }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error_body: serde_json::Value = response.json();
        assert_eq!(error_body["code"], "INVALID_ARGUMENT");
        assert_eq!(error_body["success"], false);
        assert!(error_body["error"].as_str().unwrap().contains("token_price"));
    }

    #[tokio::test]
    async fn test_valuation_rejects_duplicate_backers() {
        let server = server();

        let response = server
            .post("/api/v1/valuations")
            .json(&json!({
                "creator": creator("10"),
                "investments": [
                    {"backer_id": "a", "tokens_invested": 10},
                    {"backer_id": "a", "tokens_invested": 20}
                ]
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error_body: serde_json::Value = response.json();
        assert_eq!(error_body["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_valuation_rejects_out_of_range_top_backers() {
        let server = server();

        let response = server
            .post("/api/v1/valuations")
            .json(&json!({ "creator": creator("10"), "top_backers": 0 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_simulation() {
        let _guard = init_test_tracing();
        let server = server();

        let response = server
            .post("/api/v1/simulations")
            .json(&json!({
                "creator": creator("10"),
                "investments": [
                    {"backer_id": "a", "tokens_invested": 50},
                    {"backer_id": "b", "tokens_invested": 150}
                ],
                "tokens": 200
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let simulation = response.json::<ApiResponse<SimulationResponse>>().data;
        assert_eq!(simulation.cost, Decimal::from(2000));
        assert_eq!(simulation.cost_display, "$2,000.00");
        assert_eq!(simulation.stake_percentage, Decimal::new(500, 1));
        assert_eq!(simulation.stake_display, "50.0%");
        assert_eq!(simulation.projected_return_tokens, Decimal::from(360));
        assert_eq!(simulation.projected_gain_tokens, Decimal::from(160));
        assert_eq!(simulation.roi_display, "+80%");
    }

    #[tokio::test]
    async fn test_simulation_rejects_invalid_amounts() {
        let server = server();

        for tokens in [0, 5, 15, 510] {
            let response = server
                .post("/api/v1/simulations")
                .json(&json!({ "creator": creator("10"), "tokens": tokens }))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
            let error_body: serde_json::Value = response.json();
            assert_eq!(error_body["code"], "INVALID_ARGUMENT", "tokens = {}", tokens);
        }
    }

    #[tokio::test]
    async fn test_portfolio_summary() {
        let server = server();

        let response = server
            .post("/api/v1/portfolios")
            .json(&json!({
                "holdings": [
                    {"creator_id": "maya", "tokens": 100, "cost_basis": "1000", "current_price": "12.5"},
                    {"creator_id": "leo", "tokens": 50, "cost_basis": "500", "current_price": "8"}
                ]
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let portfolio = response.json::<ApiResponse<PortfolioResponse>>().data;
        assert_eq!(portfolio.total_tokens, 150);
        assert_eq!(portfolio.total_cost, Decimal::from(1500));
        assert_eq!(portfolio.current_value, Decimal::from(1650));
        assert_eq!(portfolio.gain, Decimal::from(150));
        assert_eq!(portfolio.total_return_display, "+10.0%");
        assert_eq!(portfolio.active_investments, 2);
        assert_eq!(portfolio.holdings[0].return_display, "+25.0%");
        assert_eq!(portfolio.holdings[1].return_display, "-20.0%");
    }

    #[tokio::test]
    async fn test_portfolio_rejects_negative_cost() {
        let server = server();

        let response = server
            .post("/api/v1/portfolios")
            .json(&json!({
                "holdings": [{"creator_id": "x", "tokens": 1, "cost_basis": "-5", "current_price": "1"}]
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_portfolio_rejects_unrepresentable_return() {
        let server = server();

        let response = server
            .post("/api/v1/portfolios")
            .json(&json!({
                "holdings": [{
                    "creator_id": "x",
                    "tokens": 1,
                    "cost_basis": "1",
                    "current_price": "79228162514264337593543950335"
                }]
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compact_formatting() {
        let server = server();

        let response = server
            .post("/api/v1/format/compact")
            .json(&json!({ "values": ["999", "1000", "1500", "1000000", "2400000"] }))
            .await;

        response.assert_status(StatusCode::OK);
        let values = response.json::<ApiResponse<Vec<CompactValue>>>().data;
        let displays: Vec<_> = values.iter().map(|v| v.display.as_str()).collect();
        assert_eq!(displays, vec!["999", "1.0k", "1.5k", "1.0M", "2.4M"]);
    }

    #[tokio::test]
    async fn test_compact_formatting_rejects_negative_and_empty() {
        let server = server();

        let negative = server
            .post("/api/v1/format/compact")
            .json(&json!({ "values": ["-1"] }))
            .await;
        negative.assert_status(StatusCode::BAD_REQUEST);

        let empty = server
            .post("/api/v1/format/compact")
            .json(&json!({ "values": [] }))
            .await;
        empty.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sentiment_score() {
        let server = server();

        let response = server
            .post("/api/v1/sentiment")
            .json(&json!({ "text": "Launching my new course!", "image_url": null }))
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<ApiResponse<SentimentScore>>().data.score, 80);
    }

    #[tokio::test]
    async fn test_sentiment_provider_failure_is_neutral() {
        let server = TestServer::new(setup_test_app_with(Arc::new(StubGenerator::failing()))).unwrap();

        let response = server
            .post("/api/v1/sentiment")
            .json(&json!({ "text": "Launching my new course!" }))
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<ApiResponse<SentimentScore>>().data.score, 50);
    }

    #[tokio::test]
    async fn test_sentiment_rejects_empty_text() {
        let server = server();

        let response = server.post("/api/v1/sentiment").json(&json!({ "text": "" })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    fn advisor_request(query: &str) -> serde_json::Value {
        json!({
            "query": query,
            "creators": [
                {"name": "Maya", "stock_price": "12.85", "sentiment": 82, "followers": 9000, "bio": "Travel"},
                {"name": "Leo", "stock_price": "4.10", "sentiment": 64}
            ]
        })
    }

    #[tokio::test]
    async fn test_advisor_answers_and_caches() {
        let _guard = init_test_tracing();
        let generator = Arc::new(StubGenerator::replying("Maya looks strong."));
        let server = TestServer::new(setup_test_app_with(generator.clone())).unwrap();

        let first = server
            .post("/api/v1/advisor/query")
            .json(&advisor_request("Who should I invest in?"))
            .await;
        first.assert_status(StatusCode::OK);
        let first = first.json::<ApiResponse<AdvisorAnswer>>().data;
        assert_eq!(first.answer, "Maya looks strong.");
        assert!(!first.cached);

        let second = server
            .post("/api/v1/advisor/query")
            .json(&advisor_request("Who should I invest in?"))
            .await
            .json::<ApiResponse<AdvisorAnswer>>()
            .data;
        assert_eq!(second.answer, "Maya looks strong.");
        assert!(second.cached);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_advisor_platform_question_skips_generator() {
        let generator = Arc::new(StubGenerator::replying("unused"));
        let server = TestServer::new(setup_test_app_with(generator.clone())).unwrap();

        let answer = server
            .post("/api/v1/advisor/query")
            .json(&advisor_request("How does the platform work?"))
            .await
            .json::<ApiResponse<AdvisorAnswer>>()
            .data;

        assert_eq!(answer.answer, PLATFORM_INFO_ANSWER);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_advisor_failure_is_not_cached() {
        let generator = Arc::new(StubGenerator::failing());
        let server = TestServer::new(setup_test_app_with(generator.clone())).unwrap();

        for _ in 0..2 {
            let answer = server
                .post("/api/v1/advisor/query")
                .json(&advisor_request("recommend a creator"))
                .await
                .json::<ApiResponse<AdvisorAnswer>>()
                .data;
            assert_eq!(answer.answer, ANALYSIS_UNAVAILABLE_ANSWER);
            assert!(!answer.cached);
        }
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_advisor_rejects_empty_query() {
        let server = server();

        let response = server
            .post("/api/v1/advisor/query")
            .json(&json!({ "query": "", "creators": [] }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = server();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let doc: serde_json::Value = response.json();
        assert!(doc["paths"]["/api/v1/valuations"]["post"].is_object());
    }

    #[tokio::test]
    async fn test_prometheus_metrics_endpoint() {
        let server = server();

        // The recorder is not installed in test builds
        let response = server.get("/metrics").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
