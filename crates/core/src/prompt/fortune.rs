//! Fortune (bốc quẻ) prompts. Output is strict JSON matching `FortuneData`.

use super::{assemble, PromptPair};
use crate::types::FortuneMode;

pub const FORTUNE_SYSTEM_PROMPT: &str = r#"Bạn là một thầy phong thủy uyên bác, chuyên luận giải quẻ đầu năm.

QUY TẮC BẮT BUỘC:
1. Trả lời ĐÚNG BẰNG JSON, không markdown, không giải thích thêm.
2. JSON phải có đúng các trường sau:
   {
     "title": "Tên quẻ 3-6 chữ Hán-Việt (VD: Thuận Lợi Hanh Thông)",
     "rating": <số nguyên 1-5, 1=xấu, 5=cực tốt>,
     "summary": "Tóm tắt 1 câu ngắn gọn",
     "detail": "Giải thích chi tiết 2-4 câu, đi sâu vào lĩnh vực được chọn",
     "advice": "Lời khuyên cụ thể, thực tế 1-2 câu",
     "lucky_element": "Yếu tố may mắn (màu sắc, số, hướng, vật phẩm...)",
     "emoji": "1 emoji đại diện duy nhất"
   }
3. Nội dung phải MỚI MẺ, SÁNG TẠO mỗi lần, không lặp khuôn mẫu.
4. Giọng văn: trang trọng nhưng dễ hiểu, pha chút huyền bí.
5. Rating phải đa dạng (không phải lúc nào cũng tốt), phân bố tự nhiên.
6. Nếu có tên người bốc, có thể nhắc đến tên trong detail hoặc advice.
"#;

fn mode_guidance(mode: FortuneMode) -> &'static str {
    match mode {
        FortuneMode::Random => {
            "Lĩnh vực: NGẪU NHIÊN – tự chọn lĩnh vực phù hợp nhất \
             (tài lộc, tình duyên, sức khỏe, công danh, hoặc gia đạo)."
        }
        FortuneMode::Wealth => {
            "Lĩnh vực: TÀI LỘC – tập trung vào vận tiền tài, đầu tư, \
             kinh doanh, thu nhập."
        }
        FortuneMode::Love => {
            "Lĩnh vực: TÌNH DUYÊN – tập trung vào tình cảm, đào hoa, \
             hôn nhân, mối quan hệ."
        }
        FortuneMode::Health => {
            "Lĩnh vực: SỨC KHỎE – tập trung vào thể chất, tinh thần, \
             bệnh tật, rèn luyện."
        }
        FortuneMode::Career => {
            "Lĩnh vực: CÔNG DANH – tập trung vào sự nghiệp, thăng tiến, \
             học tập, cơ hội nghề nghiệp."
        }
        FortuneMode::Family => {
            "Lĩnh vực: GIA ĐẠO – tập trung vào gia đình, con cái, \
             hòa thuận, nhà cửa."
        }
    }
}

/// Build the prompt pair for a fortune reading.
pub fn build_fortune_prompt(mode: FortuneMode, user_name: Option<&str>) -> PromptPair {
    PromptPair {
        system: FORTUNE_SYSTEM_PROMPT.to_string(),
        user: assemble(
            mode_guidance(mode).to_string(),
            "Người bốc quẻ tên",
            user_name,
            "Hãy luận 1 quẻ:",
        ),
    }
}
