use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use compute::error::ComputeError;
use compute::generator::{FallbackGenerator, TextGenerator, UnavailableGenerator};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use crate::config::AdvisorSettings;

#[derive(Serialize)]
struct GenerateTextRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateTextResponse {
    text: String,
}

/// Text generator backed by an HTTP proxy in front of a language model.
///
/// The proxy accepts `POST {"prompt": "..."}` and answers `{"text": "..."}`;
/// API keys stay on the proxy.
pub struct HttpTextGenerator {
    name: String,
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTextGenerator {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            name: name.into(),
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, prompt), fields(provider = %self.name, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> compute::error::Result<String> {
        debug!("Sending prompt to {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateTextRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", self.name, e);
                ComputeError::Provider(format!("{} request failed: {}", self.name, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} answered with status {}: {}", self.name, status, body);
            return Err(ComputeError::Provider(format!(
                "{} answered with status {}",
                self.name, status
            )));
        }

        let body: GenerateTextResponse = response.json().await.map_err(|e| {
            ComputeError::Provider(format!("{} returned an unexpected body: {}", self.name, e))
        })?;

        let text = body.text.trim();
        if text.is_empty() {
            return Err(ComputeError::Provider(format!("{} returned no text", self.name)));
        }
        Ok(text.to_string())
    }
}

/// Builds the advisor's generator from settings.
///
/// Both URLs give a primary/fallback pair, one URL a single provider and no
/// URL a generator that always fails.
pub fn build_generator(settings: &AdvisorSettings) -> Result<Arc<dyn TextGenerator>> {
    let timeout = Duration::from_secs(settings.timeout_secs);
    let generator: Arc<dyn TextGenerator> = match (&settings.primary_url, &settings.fallback_url) {
        (Some(primary), Some(fallback)) => Arc::new(FallbackGenerator::new(
            Arc::new(HttpTextGenerator::new("primary", primary, timeout)?),
            Arc::new(HttpTextGenerator::new("secondary", fallback, timeout)?),
        )),
        (Some(url), None) | (None, Some(url)) => {
            Arc::new(HttpTextGenerator::new("primary", url, timeout)?)
        }
        (None, None) => {
            warn!("No text generation provider configured, advisor answers will be canned");
            Arc::new(UnavailableGenerator)
        }
    };
    Ok(generator)
}
