use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, warn};

use crate::error::AttemptError;
use crate::models::{OllamaRequest, OllamaResponse};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// The seam between the generation pipeline and whatever produces text.
///
/// Implementations never fail loudly: an unreachable service is `false`, and
/// every failed or empty generation is `None`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn is_available(&self) -> bool;

    async fn generate(&self, prompt: &str) -> Option<String>;
}

/// How many times a generation request is sent, and how long to wait in between.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::ZERO,
        }
    }
}

pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sends `prompt` as a non-streaming generation request, retrying on bad
    /// status, timeout and connection failures. An empty but successful
    /// response ends the loop without retrying.
    pub async fn generate_with(
        &self,
        prompt: &str,
        model: Option<&str>,
        timeout: Duration,
    ) -> Option<String> {
        let request = OllamaRequest {
            model: model.unwrap_or(&self.model).to_string(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            debug!("Ollama API call (attempt {}/{})", attempt, max_attempts);

            match self.attempt(&request, timeout).await {
                Ok(text) if text.is_empty() => {
                    warn!("Ollama returned empty response");
                    return None;
                }
                Ok(text) => {
                    debug!("Ollama generation successful");
                    return Some(text);
                }
                Err(e) => {
                    match &e {
                        AttemptError::Other(_) => {
                            error!("Unexpected error in Ollama API call: {}", e)
                        }
                        _ => warn!(
                            "Ollama attempt {}/{} failed: {}",
                            attempt, max_attempts, e
                        ),
                    }
                    last_error = Some(e);
                }
            }

            if attempt < max_attempts && !self.retry.delay.is_zero() {
                tokio::time::sleep(self.retry.delay).await;
            }
        }

        if let Some(e) = last_error {
            error!(
                "Ollama generation failed after {} attempts: {}",
                max_attempts, e
            );
        }
        None
    }

    async fn attempt(
        &self,
        request: &OllamaRequest,
        timeout: Duration,
    ) -> Result<String, AttemptError> {
        let res = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(timeout)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(AttemptError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: OllamaResponse = res.json().await?;
        Ok(body.response.trim().to_string())
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn is_available(&self) -> bool {
        let probe = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;

        match probe {
            Ok(res) => res.status() == StatusCode::OK,
            Err(e) => {
                debug!("Ollama availability check failed: {}", e);
                false
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Option<String> {
        self.generate_with(prompt, None, self.timeout).await
    }
}
