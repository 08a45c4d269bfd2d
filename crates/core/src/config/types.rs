use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Accepts a list or a comma-separated string.
    #[serde(default = "default_cors_origins", deserialize_with = "deserialize_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginsRepr {
    List(Vec<String>),
    Csv(String),
}

fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match OriginsRepr::deserialize(deserializer)? {
        OriginsRepr::List(list) => list,
        OriginsRepr::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };
    Ok(raw
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect())
}

/// Chat-completion backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    /// Azure OpenAI deployment.
    #[default]
    AzureOpenai,
    /// OpenAI or any OpenAI-compatible server.
    Openai,
}

/// Completion API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,
    /// Azure resource endpoint, or API base for `openai`.
    pub endpoint: String,
    pub api_key: String,
    /// Azure API version (ignored for `openai`).
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Azure deployment, or model name for `openai`.
    #[serde(default = "default_deployment")]
    pub deployment: String,
    /// Per-call timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Wait before the single retry, in milliseconds (default: 2000)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_api_version() -> String {
    crate::llm::DEFAULT_AZURE_API_VERSION.to_string()
}

fn default_deployment() -> String {
    "gpt-4o".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_retry_backoff_ms() -> u64 {
    2000
}

/// Sampling budgets per use-case.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub wish: WishGenerationConfig,
    #[serde(default)]
    pub fortune: FortuneGenerationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WishGenerationConfig {
    #[serde(default = "default_wish_temperature")]
    pub temperature: f32,
    #[serde(default = "default_wish_max_tokens")]
    pub max_tokens: u32,
}

impl Default for WishGenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_wish_temperature(),
            max_tokens: default_wish_max_tokens(),
        }
    }
}

fn default_wish_temperature() -> f32 {
    0.9
}

fn default_wish_max_tokens() -> u32 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FortuneGenerationConfig {
    #[serde(default = "default_fortune_temperature")]
    pub temperature: f32,
    #[serde(default = "default_fortune_max_tokens")]
    pub max_tokens: u32,
}

impl Default for FortuneGenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_fortune_temperature(),
            max_tokens: default_fortune_max_tokens(),
        }
    }
}

fn default_fortune_temperature() -> f32 {
    0.85
}

fn default_fortune_max_tokens() -> u32 {
    500
}

/// Per-client request limit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests per minute per client IP; 0 disables limiting.
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

fn default_requests_per_minute() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
