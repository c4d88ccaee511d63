// src/validate/client.rs

use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};
use url::Url;

use super::error::ValidationServiceError;
use super::types::{to_markers, Diagnostic, Marker};
use crate::config::Config;

/// Posts source text to the validation endpoint and decodes its diagnostics.
#[derive(Debug, Clone)]
pub struct ValidationClient {
    client: Client,
    endpoint: Url,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ValidationClient {
    pub fn new(config: &Config) -> Result<Self, ValidationServiceError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.validate_url.clone(),
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn validate_once(&self, text: &str) -> Result<Vec<Diagnostic>, ValidationServiceError> {
        debug!(url = %self.endpoint, "Posting text for validation");
        let resp = self
            .client
            .post(self.endpoint.clone())
            .body(text.to_string())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ValidationServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(ValidationServiceError::Decode)
    }

    /// Send `text` and return the service's diagnostics, retrying transient
    /// failures up to the configured count with doubling backoff.
    #[instrument(level = "info", skip(self, text), fields(text_len = text.len()))]
    pub async fn validate(&self, text: &str) -> Result<Vec<Diagnostic>, ValidationServiceError> {
        let mut attempts = 0;
        loop {
            match self.validate_once(text).await {
                Ok(diags) => {
                    debug!(count = diags.len(), "Received diagnostics");
                    return Ok(diags);
                }
                Err(e) if e.is_transient() && attempts < self.max_retries => {
                    attempts += 1;
                    let backoff = self.backoff_for(attempts);
                    warn!(url = %self.endpoint, attempt = attempts, delay_ms = backoff.as_millis() as u64, error = %e, "Retrying");
                    sleep(backoff).await;
                }
                Err(e) => {
                    error!(url = %self.endpoint, error = %e, "Validation failed");
                    return Err(e);
                }
            }
        }
    }

    /// Delay before retry number `attempt` (1-based), doubling each time and
    /// saturating instead of overflowing.
    fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.retry_backoff.saturating_mul(factor)
    }

    /// [`validate`](Self::validate) followed by [`to_markers`].
    pub async fn lint(&self, text: &str) -> Result<Vec<Marker>, ValidationServiceError> {
        let diags = self.validate(text).await?;
        Ok(to_markers(&diags))
    }
}
