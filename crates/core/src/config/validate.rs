use reqwest::header::HeaderValue;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - LLM endpoint is an http(s) URL and the API key is set
/// - Sampling parameters are in range
/// - CORS origins are usable header values
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let endpoint = config.llm.endpoint.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "llm.endpoint must be an http(s) URL, got '{}'",
            config.llm.endpoint
        )));
    }

    if config.llm.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "llm.api_key cannot be empty".to_string(),
        ));
    }

    if config.llm.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "llm.timeout_secs cannot be 0".to_string(),
        ));
    }

    let sampling = [
        (
            "generation.wish",
            config.generation.wish.temperature,
            config.generation.wish.max_tokens,
        ),
        (
            "generation.fortune",
            config.generation.fortune.temperature,
            config.generation.fortune.max_tokens,
        ),
    ];
    for (section, temperature, max_tokens) in sampling {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::ValidationError(format!(
                "{section}.temperature must be between 0.0 and 2.0, got {temperature}"
            )));
        }
        if max_tokens == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{section}.max_tokens cannot be 0"
            )));
        }
    }

    for origin in &config.server.cors_origins {
        if HeaderValue::from_str(origin).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "invalid CORS origin '{origin}'"
            )));
        }
    }

    Ok(())
}
