use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::GenerationError;
use crate::config::GenerationConfig;
use crate::fallback::{fallback_fortune, fallback_wish};
use crate::interpret::{interpret_fortune, interpret_wish};
use crate::llm::{CompletionRequest, LlmClient};
use crate::metrics::{GENERATIONS, GENERATION_DURATION, GENERATION_FAILURES};
use crate::prompt::{build_fortune_prompt, build_wish_prompt, PromptPair};
use crate::types::{FortuneData, FortuneMode, FortuneResult, LixiTier, WishResult};

/// Longest failure cause written to the log.
const MAX_LOGGED_CAUSE: usize = 200;

/// Temperature and token budget for one use-case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub wish: Sampling,
    pub fortune: Sampling,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for GenerationSettings {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            wish: Sampling {
                temperature: config.wish.temperature,
                max_tokens: config.wish.max_tokens,
            },
            fortune: Sampling {
                temperature: config.fortune.temperature,
                max_tokens: config.fortune.max_tokens,
            },
        }
    }
}

/// Composes prompts, the completion client, interpreters and fallbacks.
pub struct GenerationService {
    client: Arc<dyn LlmClient>,
    settings: GenerationSettings,
}

impl GenerationService {
    /// `client` should already carry the retry policy (see
    /// [`crate::llm::create_llm_client`]).
    pub fn new(client: Arc<dyn LlmClient>, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    /// Generate a wish for `tier`. Falls back to canned wishes on any failure.
    pub async fn generate_wish(&self, tier: LixiTier, user_name: Option<&str>) -> WishResult {
        let start = Instant::now();
        let result = match self.try_wish(tier, user_name).await {
            Ok(text) => {
                info!(tier = %tier, "AI wish generated");
                record_success("wish");
                WishResult { text, tier }
            }
            Err(e) => {
                warn!(
                    tier = %tier,
                    reason = e.reason(),
                    cause = %truncate(&e.to_string(), MAX_LOGGED_CAUSE),
                    "AI wish generation failed, using fallback"
                );
                record_fallback("wish", &e);
                fallback_wish(tier)
            }
        };
        GENERATION_DURATION
            .with_label_values(&["wish"])
            .observe(start.elapsed().as_secs_f64());
        result
    }

    /// Generate a fortune reading for `mode`. Falls back to the fixed
    /// reading on any failure. `drawn_at` is stamped on completion.
    pub async fn generate_fortune(
        &self,
        mode: FortuneMode,
        user_name: Option<&str>,
    ) -> FortuneResult {
        let start = Instant::now();
        let result = match self.try_fortune(mode, user_name).await {
            Ok(fortune) => {
                info!(mode = %mode, title = %fortune.title, "AI fortune generated");
                record_success("fortune");
                FortuneResult::drawn_now(fortune, mode)
            }
            Err(e) => {
                warn!(
                    mode = %mode,
                    reason = e.reason(),
                    cause = %truncate(&e.to_string(), MAX_LOGGED_CAUSE),
                    "AI fortune generation failed, using fallback"
                );
                record_fallback("fortune", &e);
                fallback_fortune(mode)
            }
        };
        GENERATION_DURATION
            .with_label_values(&["fortune"])
            .observe(start.elapsed().as_secs_f64());
        result
    }

    async fn try_wish(
        &self,
        tier: LixiTier,
        user_name: Option<&str>,
    ) -> Result<String, GenerationError> {
        let prompt = build_wish_prompt(tier, user_name);
        let raw = self.complete(prompt, self.settings.wish).await?;
        interpret_wish(&raw)
    }

    async fn try_fortune(
        &self,
        mode: FortuneMode,
        user_name: Option<&str>,
    ) -> Result<FortuneData, GenerationError> {
        let prompt = build_fortune_prompt(mode, user_name);
        let raw = self.complete(prompt, self.settings.fortune).await?;
        interpret_fortune(&raw)
    }

    async fn complete(
        &self,
        prompt: PromptPair,
        sampling: Sampling,
    ) -> Result<String, GenerationError> {
        let request = CompletionRequest::new(prompt.user)
            .with_system(prompt.system)
            .with_temperature(sampling.temperature)
            .with_max_tokens(sampling.max_tokens);

        let response = self.client.complete(request).await?;
        Ok(response.text)
    }
}

fn record_success(kind: &str) {
    GENERATIONS.with_label_values(&[kind, "ai"]).inc();
}

fn record_fallback(kind: &str, error: &GenerationError) {
    GENERATIONS.with_label_values(&[kind, "fallback"]).inc();
    GENERATION_FAILURES
        .with_label_values(&[kind, error.reason()])
        .inc();
}

/// Cut `s` to at most `max` characters, marking the cut.
fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::{fallback_fortune_data, fallback_wishes};
    use crate::llm::LlmError;
    use crate::testing::MockLlmClient;

    fn service(mock: &Arc<MockLlmClient>) -> GenerationService {
        GenerationService::new(
            Arc::clone(mock) as Arc<dyn LlmClient>,
            GenerationSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_wish_success_strips_quotes() {
        let mock = Arc::new(MockLlmClient::new());
        mock.push_text("\"Chúc mừng năm mới 🎉\"");

        let result = service(&mock).generate_wish(LixiTier::K200, Some("Lan")).await;
        assert_eq!(result.text, "Chúc mừng năm mới 🎉");
        assert_eq!(result.tier, LixiTier::K200);
    }

    #[tokio::test]
    async fn test_wish_uses_wish_budget_and_prompts() {
        let mock = Arc::new(MockLlmClient::new());
        mock.push_text("An khang thịnh vượng");

        service(&mock).generate_wish(LixiTier::K50, Some("Lan")).await;

        let request = mock.last_request().unwrap();
        assert_eq!(request.max_tokens, 120);
        assert_eq!(request.temperature, 0.9);
        assert_eq!(request.system.as_deref(), Some(crate::prompt::WISH_SYSTEM_PROMPT));
        assert!(request.prompt.contains("Người nhận tên: Lan"));
    }

    #[tokio::test]
    async fn test_wish_empty_content_falls_back() {
        let mock = Arc::new(MockLlmClient::new());
        mock.push_text("''");

        let result = service(&mock).generate_wish(LixiTier::Special, None).await;
        assert!(fallback_wishes(LixiTier::Special).contains(&result.text.as_str()));
    }

    #[tokio::test]
    async fn test_fortune_uses_fortune_budget() {
        let mock = Arc::new(MockLlmClient::new());
        mock.push_error(LlmError::EmptyResponse);

        let result = service(&mock).generate_fortune(FortuneMode::Random, None).await;

        let request = mock.last_request().unwrap();
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.temperature, 0.85);
        assert_eq!(result.fortune, fallback_fortune_data());
        assert_eq!(result.mode, FortuneMode::Random);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc…");
        assert_eq!(truncate("Chúc mừng", 4), "Chúc…");
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = GenerationConfig::default();
        config.fortune.max_tokens = 800;
        let settings = GenerationSettings::from(&config);
        assert_eq!(settings.fortune.max_tokens, 800);
        assert_eq!(settings.wish.max_tokens, 120);
    }
}
