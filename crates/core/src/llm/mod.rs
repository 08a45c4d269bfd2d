//! Chat-completion clients.
//!
//! [`LlmClient`] is the seam the generation layer talks to. Concrete
//! backends ([`AzureOpenAiClient`], [`OpenAiClient`]) perform exactly one
//! HTTP call per `complete`; [`RetryingClient`] adds the single bounded
//! retry on transient failures.

mod azure;
mod chat;
mod client;
mod openai;
mod retry;

use std::sync::Arc;
use std::time::Duration;

pub use azure::{AzureOpenAiClient, DEFAULT_AZURE_API_VERSION};
pub use client::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};
pub use openai::OpenAiClient;
pub use retry::{RetryPolicy, RetryingClient, MAX_ATTEMPTS};

use crate::config::{LlmConfig, LlmProvider};

/// Build the configured backend wrapped in the retry policy.
pub fn create_llm_client(config: &LlmConfig) -> Arc<dyn LlmClient> {
    let timeout = Duration::from_secs(u64::from(config.timeout_secs));

    let backend: Arc<dyn LlmClient> = match config.provider {
        LlmProvider::AzureOpenai => Arc::new(
            AzureOpenAiClient::new(&config.endpoint, &config.api_key, &config.deployment)
                .with_api_version(&config.api_version)
                .with_timeout(timeout),
        ),
        LlmProvider::Openai => Arc::new(
            OpenAiClient::new(&config.api_key, &config.deployment)
                .with_api_base(&config.endpoint)
                .with_timeout(timeout),
        ),
    };

    Arc::new(RetryingClient::new(
        backend,
        RetryPolicy {
            backoff: Duration::from_millis(config.retry_backoff_ms),
        },
    ))
}
