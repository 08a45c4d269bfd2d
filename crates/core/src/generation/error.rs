use thiserror::Error;

use crate::llm::LlmError;

/// Why a generation attempt could not produce model content.
///
/// Never leaves the generation layer: every variant is converted into
/// fallback content by the use-case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error("Content invalid: {0}")]
    ContentInvalid(String),
}

impl GenerationError {
    /// Short label used in logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            GenerationError::Completion(e) => e.kind(),
            GenerationError::ContentInvalid(_) => "content_invalid",
        }
    }
}
