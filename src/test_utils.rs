#[cfg(test)]
pub mod test_utils {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::router::create_router;
    use crate::schemas::AppState;
    use async_trait::async_trait;
    use axum::Router;
    use compute::error::{ComputeError, Result};
    use compute::generator::TextGenerator;
    use compute::valuation::ValuationCalculator;
    use moka::future::Cache;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Text generator answering every prompt with the same reply, or failing
    /// when it has none. Counts its calls.
    pub struct StubGenerator {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl StubGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .ok_or_else(|| ComputeError::Provider("stub provider is down".to_string()))
        }
    }

    /// Create AppState for testing around the given generator
    pub fn setup_test_app_state_with(generator: Arc<dyn TextGenerator>) -> AppState {
        let cache = Cache::new(100);
        AppState::new(ValuationCalculator::default(), "USD".to_string(), generator, cache)
    }

    /// Create AppState for testing
    pub fn setup_test_app_state() -> AppState {
        setup_test_app_state_with(Arc::new(StubGenerator::replying("0.8")))
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        create_router(setup_test_app_state())
    }

    /// Create axum app for testing with a specific text generator
    pub fn setup_test_app_with(generator: Arc<dyn TextGenerator>) -> Router {
        create_router(setup_test_app_state_with(generator))
    }
}
