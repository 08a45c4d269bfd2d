//! OpenAI (or any OpenAI-compatible server) chat-completion client.

use async_trait::async_trait;
use std::time::Duration;

use super::chat::{send_chat, ChatRequest};
use super::client::{CompletionRequest, CompletionResponse, LlmClient, LlmError};

/// Client for `POST {api_base}/v1/chat/completions` with bearer auth.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            api_base: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn provider(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = ChatRequest::from_completion(request, Some(self.model.clone()));

        let builder = self
            .client
            .post(format!("{}/v1/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout);

        send_chat(builder, &body, &self.model).await
    }
}
