pub mod config;
pub mod fallback;
pub mod generation;
pub mod interpret;
pub mod llm;
pub mod metrics;
pub mod prompt;
pub mod rate_limit;
pub mod testing;
pub mod types;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError,
};
pub use generation::{GenerationError, GenerationService, GenerationSettings};
pub use llm::{create_llm_client, LlmClient, LlmError};
pub use rate_limit::{RateLimitError, RateLimiterPool};
pub use types::{
    FortuneData, FortuneMode, FortuneRequest, FortuneResult, LixiTier, WishRequest, WishResult,
};
