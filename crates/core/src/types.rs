//! Domain types shared by the prompt builder, interpreters, fallbacks and
//! the HTTP layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lì xì denomination. Selects the tone of a generated wish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LixiTier {
    #[serde(rename = "50k")]
    K50,
    #[serde(rename = "100k")]
    K100,
    #[serde(rename = "200k")]
    K200,
    #[serde(rename = "500k")]
    K500,
    #[serde(rename = "special")]
    Special,
}

impl LixiTier {
    pub const ALL: [LixiTier; 5] = [
        LixiTier::K50,
        LixiTier::K100,
        LixiTier::K200,
        LixiTier::K500,
        LixiTier::Special,
    ];

    /// Wire value, also used as a log and metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            LixiTier::K50 => "50k",
            LixiTier::K100 => "100k",
            LixiTier::K200 => "200k",
            LixiTier::K500 => "500k",
            LixiTier::Special => "special",
        }
    }
}

impl fmt::Display for LixiTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Life domain a fortune reading focuses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FortuneMode {
    #[serde(rename = "random")]
    Random,
    /// Tài lộc
    #[serde(rename = "tai_loc")]
    Wealth,
    /// Tình duyên
    #[serde(rename = "tinh_duyen")]
    Love,
    /// Sức khỏe
    #[serde(rename = "suc_khoe")]
    Health,
    /// Công danh
    #[serde(rename = "cong_danh")]
    Career,
    /// Gia đạo
    #[serde(rename = "gia_dao")]
    Family,
}

impl FortuneMode {
    pub const ALL: [FortuneMode; 6] = [
        FortuneMode::Random,
        FortuneMode::Wealth,
        FortuneMode::Love,
        FortuneMode::Health,
        FortuneMode::Career,
        FortuneMode::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FortuneMode::Random => "random",
            FortuneMode::Wealth => "tai_loc",
            FortuneMode::Love => "tinh_duyen",
            FortuneMode::Health => "suc_khoe",
            FortuneMode::Career => "cong_danh",
            FortuneMode::Family => "gia_dao",
        }
    }
}

impl fmt::Display for FortuneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for a wish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishRequest {
    pub lixi_type: LixiTier,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Request body for a fortune reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortuneRequest {
    pub mode: FortuneMode,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// A generated (or fallback) wish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishResult {
    #[serde(rename = "wish_text")]
    pub text: String,
    #[serde(rename = "lixi_type")]
    pub tier: LixiTier,
}

/// A fully validated fortune reading.
///
/// Only produced by the fortune interpreter or the fallback table, so every
/// field is present and `rating` is always within `1..=5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneData {
    pub title: String,
    pub rating: u8,
    pub summary: String,
    pub detail: String,
    pub advice: String,
    pub lucky_element: String,
    pub emoji: String,
}

/// A fortune reading together with the request mode and draw time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneResult {
    pub fortune: FortuneData,
    pub mode: FortuneMode,
    /// Milliseconds since the Unix epoch.
    pub drawn_at: i64,
}

impl FortuneResult {
    /// Wrap a fortune, stamping it with the current time.
    pub fn drawn_now(fortune: FortuneData, mode: FortuneMode) -> Self {
        Self {
            fortune,
            mode,
            drawn_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
