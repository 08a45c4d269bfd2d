//! Testing utilities shared by unit and integration tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use lixi_core::testing::{fixtures, MockLlmClient};
//!
//! let client = MockLlmClient::new();
//! client.push_text(&fixtures::fortune_json(4));
//! client.push_error(LlmError::EmptyResponse);
//! ```

mod mock_llm_client;

pub use mock_llm_client::MockLlmClient;

/// Canned completion payloads.
pub mod fixtures {
    /// A well-formed fortune document with the given rating.
    pub fn fortune_json(rating: i64) -> String {
        serde_json::json!({
            "title": "Phúc Lộc Song Toàn",
            "rating": rating,
            "summary": "Năm mới phúc lộc đầy nhà.",
            "detail": "Tài vận vững vàng, gia đạo êm ấm.",
            "advice": "Chi tiêu có kế hoạch.",
            "lucky_element": "Màu vàng, số 6",
            "emoji": "🧧"
        })
        .to_string()
    }

    /// The same document wrapped in a markdown code fence.
    pub fn fenced_fortune_json(rating: i64) -> String {
        format!("```json\n{}\n```", fortune_json(rating))
    }
}
