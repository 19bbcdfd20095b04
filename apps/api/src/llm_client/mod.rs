/// LLM Client — the single point of entry for all Ollama calls in this service.
///
/// ARCHITECTURAL RULE: No other module may call the Ollama API directly.
/// All LLM interactions MUST go through this module.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Gave up after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

/// Request body for the Ollama `/api/generate` endpoint.
/// `temperature` and `top_p` ride at the top level and `stream` is always
/// false, matching how this service has always talked to Ollama.
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    temperature: f64,
    top_p: f64,
}

/// The subset of the Ollama generate response we care about.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Abstraction over the text-generation backend, so handlers and the
/// generation pipeline can be exercised with a mock in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// The single LLM client used by all services here.
/// Wraps the Ollama generate API with retry logic.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
    temperature: f64,
    top_p: f64,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            url: config.ollama_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    /// Makes a call to the Ollama generate endpoint and returns the text.
    /// Retries on transport errors, 429 and 5xx with exponential backoff.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Ollama call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.url)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Ollama API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let ollama_response: OllamaResponse = response.json().await?;
            let text = ollama_response.response.trim().to_string();

            if text.is_empty() {
                return Err(LlmError::EmptyContent);
            }

            debug!("Ollama call succeeded: {} chars generated", text.len());

            return Ok(text);
        }

        Err(last_error.unwrap_or(LlmError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = OllamaRequest {
            model: "gemma:2b",
            prompt: "hello",
            stream: false,
            temperature: 0.7,
            top_p: 0.9,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gemma:2b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["top_p"], 0.9);
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let raw = r#"{"model":"gemma:2b","response":"Dear team,","done":true,"total_duration":123}"#;
        let parsed: OllamaResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.response, "Dear team,");
    }
}
