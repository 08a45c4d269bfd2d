//! Offline content served whenever generation fails.

use rand::seq::IndexedRandom;

use crate::types::{FortuneData, FortuneMode, FortuneResult, LixiTier, WishResult};

/// Hand-written wishes per denomination.
pub fn fallback_wishes(tier: LixiTier) -> &'static [&'static str] {
    match tier {
        LixiTier::K50 => &[
            "Chúc năm mới nhẹ nhàng, tiền vào đều đều 🍀",
            "Năm mới bình an, túi luôn rủng rỉnh 💚",
        ],
        LixiTier::K100 => &[
            "Chúc bạn an khang, tài lộc khởi sắc 💰",
            "Năm mới vạn sự như ý, tiền tài dồi dào 🎋",
        ],
        LixiTier::K200 => &[
            "Công việc hanh thông, lộc đến bất ngờ ✨",
            "Tài lộc phơi phới, vạn sự hanh thông 🌟",
        ],
        LixiTier::K500 => &[
            "Phát tài phát lộc, tiền rủng rỉnh cả năm 🧧",
            "Đại phát, đại lộc – năm nay là năm của bạn! 🎊",
        ],
        LixiTier::Special => &[
            "WOW! Siêu may mắn – năm nay chắc chắn bứt phá 🎆",
            "JACKPOT! Vận may đỉnh cao, cả năm rực rỡ 🌈✨",
        ],
    }
}

/// The fixed fortune record. Deliberately the same for every mode.
pub fn fallback_fortune_data() -> FortuneData {
    FortuneData {
        title: "Vạn Sự Như Ý".to_string(),
        rating: 4,
        summary: "Năm mới nhiều thuận lợi, mọi việc hanh thông.".to_string(),
        detail: "Vận thế đang lên, các kế hoạch sẽ được triển khai suôn sẻ. \
                 Quý nhân sẽ xuất hiện đúng lúc để hỗ trợ bạn."
            .to_string(),
        advice: "Kiên trì với mục tiêu đã đặt ra, đừng dao động.".to_string(),
        lucky_element: "Màu đỏ, số 8, hướng Đông".to_string(),
        emoji: "🎊".to_string(),
    }
}

/// Pick one of the tier's wishes uniformly at random.
pub fn fallback_wish(tier: LixiTier) -> WishResult {
    let candidates = fallback_wishes(tier);
    let text = candidates
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Chúc mừng năm mới! 🧧");

    WishResult {
        text: text.to_string(),
        tier,
    }
}

/// The fixed fortune, stamped with the current time.
pub fn fallback_fortune(mode: FortuneMode) -> FortuneResult {
    FortuneResult::drawn_now(fallback_fortune_data(), mode)
}
