use std::sync::Arc;
use lixi_core::{Config, GenerationService, GenerationSettings, LlmClient, RateLimiterPool};

/// Shared application state
pub struct AppState {
    config: Config,
    generation: GenerationService,
    rate_limiter: RateLimiterPool,
}

impl AppState {
    /// Build the state from a loaded config and an LLM client.
    ///
    /// `llm_client` is used as-is; production callers pass the retrying
    /// client from `create_llm_client`.
    pub fn new(config: Config, llm_client: Arc<dyn LlmClient>) -> Self {
        let generation =
            GenerationService::new(llm_client, GenerationSettings::from(&config.generation));
        let rate_limiter = RateLimiterPool::new(config.rate_limit.requests_per_minute);

        Self {
            config,
            generation,
            rate_limiter,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn generation(&self) -> &GenerationService {
        &self.generation
    }

    pub fn rate_limiter(&self) -> &RateLimiterPool {
        &self.rate_limiter
    }
}
