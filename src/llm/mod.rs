//! LLM client for pick extraction
//!
//! This module sends one comment at a time to a local Ollama instance and
//! turns the reply into an [`ExtractionResult`]. Callers depend on the
//! [`PickExtractor`] trait so tests can swap in a deterministic stub.

pub mod error;
pub mod prompt;
pub mod reply;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::PipelineErrorTrait;
use crate::models::ExtractionResult;

pub use error::{ExtractionError, LlmResult};
pub use prompt::build_pick_prompt;
pub use reply::parse_extraction;

/// Configuration for LLM client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Ollama endpoint URL (default: http://localhost:11434)
    pub endpoint: String,

    /// Model name to use (default: mistral)
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature for generation
    pub temperature: f32,

    /// Ask the backend to constrain output to JSON
    pub json_mode: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            timeout_secs: 120,
            max_tokens: 512,
            temperature: 0.0,
            json_mode: true,
        }
    }
}

impl LlmConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("OLLAMA_ENDPOINT").unwrap_or(defaults.endpoint),
            model: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.model),
            timeout_secs: std::env::var("OLLAMA_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_tokens: std::env::var("OLLAMA_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: std::env::var("OLLAMA_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.temperature),
            json_mode: defaults.json_mode,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Anything that can turn a comment into an extraction result
#[async_trait]
pub trait PickExtractor: Send + Sync {
    /// Model identifier, for logging
    fn model(&self) -> &str;

    /// One extraction attempt; errors are reported, not masked
    async fn try_extract(&self, comment: &str) -> LlmResult<ExtractionResult>;

    /// Extract a record, substituting the fallback record on any failure
    ///
    /// Never fails: every comment yields exactly one record.
    async fn extract(&self, comment: &str) -> ExtractionResult {
        match self.try_extract(comment).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    model = %self.model(),
                    category = e.category().as_str(),
                    error = %e,
                    "Pick extraction failed, using fallback record"
                );
                ExtractionResult::fallback()
            }
        }
    }
}

/// Ollama chat request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Ollama generation options
#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama chat response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: String,
}

/// Ollama-backed pick extractor
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a new LLM client with default config
    pub fn new() -> LlmResult<Self> {
        Self::with_config(LlmConfig::default())
    }

    /// Create a new LLM client with custom config
    pub fn with_config(config: LlmConfig) -> LlmResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    /// Create a client from environment variables
    pub fn from_env() -> LlmResult<Self> {
        Self::with_config(LlmConfig::from_env())
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Check if Ollama is reachable
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.endpoint.trim_end_matches('/'));
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "LLM backend availability check failed");
                false
            }
        }
    }

    /// Send a single user-role prompt and return the reply content
    pub async fn chat(&self, prompt: &str) -> LlmResult<String> {
        let url = format!("{}/api/chat", self.config.endpoint.trim_end_matches('/'));

        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            format: self.config.json_mode.then_some("json"),
            options: ChatOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Status { status, body });
        }

        let reply: ChatResponse = response.json().await?;
        Ok(reply.message.content)
    }
}

#[async_trait]
impl PickExtractor for LlmClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn try_extract(&self, comment: &str) -> LlmResult<ExtractionResult> {
        let prompt = build_pick_prompt(comment);
        let reply = self.chat(&prompt).await?;
        let excerpt: String = reply.chars().take(200).collect();
        tracing::debug!(reply = %excerpt, "LLM reply");
        parse_extraction(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingExtractor;

    #[async_trait]
    impl PickExtractor for FailingExtractor {
        fn model(&self) -> &str {
            "failing"
        }

        async fn try_extract(&self, _comment: &str) -> LlmResult<ExtractionResult> {
            Err(ExtractionError::EmptyReply)
        }
    }

    #[test]
    fn test_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.endpoint, "http://localhost:11434");
        assert_eq!(config.model, "mistral");
        assert!(config.json_mode);
    }

    #[test]
    fn test_config_partial_toml_uses_defaults() {
        let config: LlmConfig = toml::from_str(r#"model = "llama3""#).unwrap();
        assert_eq!(config.model, "llama3");
        assert_eq!(config.endpoint, LlmConfig::default().endpoint);
    }

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest {
            model: "mistral",
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
            stream: false,
            format: None,
            options: ChatOptions {
                temperature: 0.0,
                num_predict: 16,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["stream"], false);
        assert!(json.get("format").is_none());
    }

    #[test]
    fn test_extract_masks_failure() {
        let record = tokio_test::block_on(FailingExtractor.extract("anything"));
        assert!(record.is_fallback());
    }
}
