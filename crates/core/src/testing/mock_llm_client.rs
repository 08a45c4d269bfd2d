//! Scripted LLM client for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};

/// Mock implementation of the [`LlmClient`] trait.
///
/// Replies are consumed in the order they were pushed. Once the script is
/// exhausted every call fails with [`LlmError::EmptyResponse`].
///
/// ```rust,ignore
/// let client = MockLlmClient::new();
/// client.push_error(LlmError::Timeout("slow".into()));
/// client.push_text("Chúc mừng năm mới");
///
/// // First call times out, second succeeds.
/// assert_eq!(client.call_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every call before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful completion.
    pub fn push_text(&self, text: &str) {
        self.lock_script().push_back(Ok(text.to_string()));
    }

    /// Queue a failed completion.
    pub fn push_error(&self, error: LlmError) {
        self.lock_script().push_back(Err(error));
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests().pop()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, LlmError>>> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .lock_script()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse));

        next.map(|text| CompletionResponse {
            text,
            usage: LlmUsage {
                input_tokens: 0,
                output_tokens: 0,
            },
            model: "mock-model".to_string(),
        })
    }
}
