//! Text generation seam used by the sentiment scorer and the advisor.
//!
//! Concrete providers live with the service; this module only defines the
//! trait and the primary/secondary failover.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::error::{ComputeError, Result};

/// A language-model backend that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Tries the primary provider once, then the secondary once.
///
/// There are no retries. When both providers fail the secondary's error is
/// returned and callers substitute their own fallback text.
pub struct FallbackGenerator {
    primary: Arc<dyn TextGenerator>,
    secondary: Arc<dyn TextGenerator>,
}

impl FallbackGenerator {
    pub fn new(primary: Arc<dyn TextGenerator>, secondary: Arc<dyn TextGenerator>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl TextGenerator for FallbackGenerator {
    fn name(&self) -> &str {
        "fallback"
    }

    #[instrument(skip(self, prompt), fields(primary = self.primary.name(), secondary = self.secondary.name()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self.primary.generate(prompt).await {
            Ok(text) => {
                debug!("Primary provider answered");
                Ok(text)
            }
            Err(primary_error) => {
                warn!(error = %primary_error, "Primary provider failed, falling back to {}", self.secondary.name());
                self.secondary.generate(prompt).await.map_err(|secondary_error| {
                    warn!(error = %secondary_error, "Secondary provider failed as well");
                    secondary_error
                })
            }
        }
    }
}

/// Stands in when no provider is configured; every call fails.
#[derive(Debug, Default)]
pub struct UnavailableGenerator;

#[async_trait]
impl TextGenerator for UnavailableGenerator {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(ComputeError::Provider("no text generation provider is configured".to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Replays canned replies and records the prompts it was given.
    pub struct ScriptedGenerator {
        name: &'static str,
        reply: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn replying(name: &'static str, reply: &str) -> Self {
            Self {
                name,
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(name: &'static str) -> Self {
            Self {
                name,
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn name(&self) -> &str {
            self.name
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .ok_or_else(|| ComputeError::Provider(format!("{} is down", self.name)))
        }
    }
}
