//! Prompt templates for wish and fortune generation.
//!
//! Each builder is a pure function returning a [`PromptPair`]: a fixed
//! system prompt for the use-case and a user prompt assembled from a
//! per-mode guidance line, an optional name line and a closing instruction.

mod fortune;
mod wish;

pub use fortune::{build_fortune_prompt, FORTUNE_SYSTEM_PROMPT};
pub use wish::{build_wish_prompt, WISH_SYSTEM_PROMPT};

/// System and user prompt sent as the two chat messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Join guidance, optional name line and closing line with newlines.
///
/// The name is included verbatim; blank names are treated as absent.
fn assemble(guidance: String, name_label: &str, user_name: Option<&str>, closing: &str) -> String {
    let mut parts = vec![guidance];

    if let Some(name) = user_name.filter(|n| !n.is_empty()) {
        parts.push(format!("{name_label}: {name}"));
    }

    parts.push(closing.to_string());
    parts.join("\n")
}
