//! Wish and fortune use-cases.
//!
//! Each use-case runs `prompt → completion → interpretation` as a pipeline
//! of `Result`s and converts any failure into fallback content, so the
//! public entry points cannot fail.
//!
//! ```text
//! Start → PromptBuilt → Completing ─┬─> Interpreting ──> Success
//!                                   └─> Failed ─> Fallback ─> Success
//! ```

mod error;
mod service;

pub use error::GenerationError;
pub use service::{GenerationService, GenerationSettings, Sampling};
