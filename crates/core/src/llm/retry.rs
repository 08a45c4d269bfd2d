//! Bounded retry around any [`LlmClient`].

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

use super::client::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use crate::metrics::{LLM_REQUESTS, LLM_REQUEST_DURATION, LLM_RETRIES, LLM_TOKENS};

/// Upper bound on upstream calls per logical request (one retry).
pub const MAX_ATTEMPTS: u32 = 2;

/// Retry settings. Only the wait between attempts is tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: Duration::from_secs(2),
        }
    }
}

/// Wraps a client and retries once on `Timeout` or `RateLimited`.
///
/// Other failures are returned immediately. The backoff is an async sleep,
/// so dropping the returned future while waiting cancels the retry.
pub struct RetryingClient {
    inner: Arc<dyn LlmClient>,
    policy: RetryPolicy,
}

impl RetryingClient {
    pub fn new(inner: Arc<dyn LlmClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn attempt(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let provider = self.inner.provider();
        let start = Instant::now();
        let result = self.inner.complete(request).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        LLM_REQUESTS.with_label_values(&[provider, outcome]).inc();
        LLM_REQUEST_DURATION
            .with_label_values(&[provider])
            .observe(start.elapsed().as_secs_f64());
        if let Ok(response) = &result {
            LLM_TOKENS
                .with_label_values(&[provider, "input"])
                .inc_by(u64::from(response.usage.input_tokens));
            LLM_TOKENS
                .with_label_values(&[provider, "output"])
                .inc_by(u64::from(response.usage.output_tokens));
        }

        result
    }
}

#[async_trait]
impl LlmClient for RetryingClient {
    fn provider(&self) -> &str {
        self.inner.provider()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let mut attempt = 1;
        loop {
            match self.attempt(request.clone()).await {
                Err(e) if e.is_transient() && attempt < MAX_ATTEMPTS => {
                    warn!(
                        provider = self.inner.provider(),
                        kind = e.kind(),
                        attempt,
                        backoff_ms = self.policy.backoff.as_millis() as u64,
                        "LLM call failed, retrying"
                    );
                    LLM_RETRIES.with_label_values(&[e.kind()]).inc();
                    tokio::time::sleep(self.policy.backoff).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
