//! Wire format shared by OpenAI-compatible chat-completion endpoints.

use reqwest::{header::RETRY_AFTER, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{CompletionRequest, CompletionResponse, LlmError, LlmUsage};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatRequest {
    /// System message first (when present), then the user message.
    pub fn from_completion(request: CompletionRequest, model: Option<String>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: request.prompt,
        });

        Self {
            model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatError {
    error: ChatErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ChatErrorDetail {
    message: String,
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(e.to_string())
    } else {
        LlmError::Upstream {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Send a prepared chat-completion request and map the outcome.
pub(crate) async fn send_chat(
    builder: RequestBuilder,
    body: &ChatRequest,
    fallback_model: &str,
) -> Result<CompletionResponse, LlmError> {
    let response = builder
        .header("content-type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(map_transport_error)?;

    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        return Err(LlmError::RateLimited { retry_after_secs });
    }

    if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::GATEWAY_TIMEOUT {
        return Err(LlmError::Timeout(format!("upstream returned {}", status.as_u16())));
    }

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ChatError>(&error_text)
            .map(|e| e.error.message)
            .unwrap_or(error_text);
        return Err(LlmError::Upstream {
            status: Some(status.as_u16()),
            message,
        });
    }

    let chat_response: ChatResponse = response.json().await.map_err(|e| {
        if e.is_timeout() {
            LlmError::Timeout(e.to_string())
        } else {
            LlmError::Upstream {
                status: Some(status.as_u16()),
                message: format!("invalid response body: {e}"),
            }
        }
    })?;

    let text = chat_response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(LlmError::EmptyResponse)?;

    let usage = chat_response
        .usage
        .map(|u| LlmUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    debug!(
        input_tokens = usage.input_tokens,
        output_tokens = usage.output_tokens,
        "Chat completion received"
    );

    Ok(CompletionResponse {
        text,
        usage,
        model: if chat_response.model.is_empty() {
            fallback_model.to_string()
        } else {
            chat_response.model
        },
    })
}
