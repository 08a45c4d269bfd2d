//! Wish (lì xì) prompts. Output is a single plain-text sentence.

use super::{assemble, PromptPair};
use crate::types::LixiTier;

pub const WISH_SYSTEM_PROMPT: &str = "\
Bạn là một nhà thư pháp Việt Nam chuyên viết lời chúc Tết Nguyên Đán.

QUY TẮC BẮT BUỘC:
- Viết ĐÚNG 1 câu chúc duy nhất, tối đa 40 từ.
- Sử dụng tiếng Việt có dấu, văn phong trang nhã nhưng gần gũi.
- Có thể thêm 1-2 emoji phù hợp ở cuối câu.
- KHÔNG dùng markdown, KHÔNG xuống dòng, KHÔNG giải thích thêm.
- Mỗi lời chúc phải KHÁC BIỆT, sáng tạo, không lặp lại khuôn mẫu.
- Nếu có tên người nhận, hãy gọi tên thân mật ở đầu câu.
";

/// Tone guidance per denomination.
fn tier_guidance(tier: LixiTier) -> &'static str {
    match tier {
        LixiTier::K50 => {
            "Mệnh giá 50.000đ – nhỏ nhưng ý nghĩa. \
             Giọng nhẹ nhàng, ấm áp, mang ý bình an, khởi đầu may mắn."
        }
        LixiTier::K100 => {
            "Mệnh giá 100.000đ – vừa phải, tốt lành. \
             Giọng vui vẻ, trang trọng, chúc an khang thịnh vượng."
        }
        LixiTier::K200 => {
            "Mệnh giá 200.000đ – khá may mắn. \
             Giọng phấn khởi, chúc tài lộc hanh thông, công việc thuận buồm."
        }
        LixiTier::K500 => {
            "Mệnh giá 500.000đ – rất may mắn! \
             Giọng hào sảng, đại phát tài, phú quý song toàn."
        }
        LixiTier::Special => {
            "Mệnh giá ĐẶC BIỆT – jackpot siêu hiếm! \
             Giọng phấn khích, chúc mừng đặc biệt, siêu may mắn, rực rỡ cả năm."
        }
    }
}

/// Build the prompt pair for a wish.
pub fn build_wish_prompt(tier: LixiTier, user_name: Option<&str>) -> PromptPair {
    PromptPair {
        system: WISH_SYSTEM_PROMPT.to_string(),
        user: assemble(
            format!("Mệnh giá: {}", tier_guidance(tier)),
            "Người nhận tên",
            user_name,
            "Hãy viết 1 câu chúc Tết:",
        ),
    }
}
