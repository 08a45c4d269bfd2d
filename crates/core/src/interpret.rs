//! Turning raw completion text into typed results.
//!
//! Both interpreters are pure: raw text in, typed value or
//! [`GenerationError::ContentInvalid`] out.

use serde::Deserialize;

use crate::generation::GenerationError;
use crate::types::FortuneData;

const FENCE: &str = "```";

/// Clean a plain-text wish.
///
/// Strips every leading and trailing `"`, then every leading and trailing
/// `'`. Nothing else is trimmed.
pub fn interpret_wish(raw: &str) -> Result<String, GenerationError> {
    let text = raw.trim_matches('"').trim_matches('\'');
    if text.is_empty() {
        return Err(GenerationError::ContentInvalid(
            "wish text is empty after sanitization".to_string(),
        ));
    }
    Ok(text.to_string())
}

/// Remove a leading fence line (```` ```json ````) and a trailing fence.
fn strip_fences(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    if cleaned.starts_with(FENCE) {
        cleaned = cleaned.split_once('\n').map_or(cleaned, |(_, rest)| rest);
    }
    if cleaned.ends_with(FENCE) {
        cleaned = cleaned.rsplit_once(FENCE).map_or(cleaned, |(head, _)| head);
    }
    cleaned.trim()
}

/// Shape the model is asked to emit. Decoded first, validated second.
#[derive(Debug, Deserialize)]
struct FortuneWire {
    title: String,
    rating: i64,
    summary: String,
    detail: String,
    advice: String,
    lucky_element: String,
    emoji: String,
}

impl TryFrom<FortuneWire> for FortuneData {
    type Error = GenerationError;

    fn try_from(wire: FortuneWire) -> Result<Self, Self::Error> {
        let rating = u8::try_from(wire.rating)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or_else(|| {
                GenerationError::ContentInvalid(format!(
                    "rating {} outside 1..=5",
                    wire.rating
                ))
            })?;

        Ok(FortuneData {
            title: wire.title,
            rating,
            summary: wire.summary,
            detail: wire.detail,
            advice: wire.advice,
            lucky_element: wire.lucky_element,
            emoji: wire.emoji,
        })
    }
}

/// Decode and validate a fortune reading.
pub fn interpret_fortune(raw: &str) -> Result<FortuneData, GenerationError> {
    let cleaned = strip_fences(raw);

    let value: serde_json::Value = serde_json::from_str(cleaned)
        .map_err(|e| GenerationError::ContentInvalid(format!("invalid JSON: {e}")))?;

    if !value.is_object() {
        return Err(GenerationError::ContentInvalid(
            "expected a JSON object".to_string(),
        ));
    }

    let wire: FortuneWire = serde_json::from_value(value)
        .map_err(|e| GenerationError::ContentInvalid(format!("schema mismatch: {e}")))?;

    FortuneData::try_from(wire)
}
