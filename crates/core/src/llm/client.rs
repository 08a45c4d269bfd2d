//! LLM client abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for LLM operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Rate limited by upstream (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Upstream error: {status:?} - {message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("Empty response from model")]
    EmptyResponse,
}

impl LlmError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Timeout(_) => "timeout",
            LlmError::RateLimited { .. } => "rate_limited",
            LlmError::Upstream { .. } => "upstream",
            LlmError::EmptyResponse => "empty_response",
        }
    }

    /// Whether a second attempt has a reasonable chance of succeeding.
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Timeout(_) | LlmError::RateLimited { .. })
    }
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Request for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (persona and output rules)
    pub system: Option<String>,
    /// User message
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            max_tokens: 500,
            temperature: 0.85,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Response from a completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The generated text, trimmed
    pub text: String,
    /// Token usage
    pub usage: LlmUsage,
    /// Model (or deployment) that served the request
    pub model: String,
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider name (e.g., "azure_openai", "openai")
    fn provider(&self) -> &str;

    /// Model or deployment name
    fn model(&self) -> &str;

    /// Send one completion request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
