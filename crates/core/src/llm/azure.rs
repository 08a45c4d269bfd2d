//! Azure OpenAI chat-completion client.

use async_trait::async_trait;
use std::time::Duration;

use super::chat::{send_chat, ChatRequest};
use super::client::{CompletionRequest, CompletionResponse, LlmClient, LlmError};

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-12-01-preview";

/// Azure OpenAI client addressing a single deployment.
pub struct AzureOpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
    timeout: Duration,
}

impl AzureOpenAiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            deployment: deployment.into(),
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Per-call timeout; exceeding it yields [`LlmError::Timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        )
    }
}

#[async_trait]
impl LlmClient for AzureOpenAiClient {
    fn provider(&self) -> &str {
        "azure_openai"
    }

    fn model(&self) -> &str {
        &self.deployment
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        // The deployment in the URL selects the model
        let body = ChatRequest::from_completion(request, None);

        let builder = self
            .client
            .post(self.url())
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .timeout(self.timeout);

        send_chat(builder, &body, &self.deployment).await
    }
}
