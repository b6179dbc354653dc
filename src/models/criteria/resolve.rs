//! 评分条目文本解析
//!
//! 教师每个槽位可以从题库挑一道题，也可以写自定义文本。
//! 存储形态里两者互斥，显示文本按自定义文本、题库文本的顺序取。

use std::collections::HashMap;

use super::entities::CriterionSlot;
use super::requests::CriterionChoice;
use super::responses::CriterionView;
use crate::models::evaluations::entities::CRITERIA_COUNT;

/// 把教师的选择规范化成存储形态，题库选择优先于自定义文本
pub fn slot_for_choice(slot: i32, choice: &CriterionChoice) -> CriterionSlot {
    if choice.question_bank_id > 0 {
        CriterionSlot {
            slot,
            question_text: None,
            question_bank_id: choice.question_bank_id,
        }
    } else {
        CriterionSlot {
            slot,
            question_text: Some(choice.custom_text.clone()),
            question_bank_id: 0,
        }
    }
}

/// 单条槽位的显示文本：自定义文本优先，其次题库文本，查不到记空串
pub fn resolve_label(slot: &CriterionSlot, bank: &HashMap<i64, String>) -> String {
    match &slot.question_text {
        Some(text) if !text.is_empty() => text.clone(),
        _ if slot.question_bank_id > 0 => {
            bank.get(&slot.question_bank_id).cloned().unwrap_or_default()
        }
        _ => String::new(),
    }
}

/// 补齐到固定槽位数的条目视图，未定义的槽位全空
pub fn criterion_views(
    slots: &[CriterionSlot],
    bank: &HashMap<i64, String>,
) -> Vec<CriterionView> {
    (1..=CRITERIA_COUNT as i32)
        .map(|n| match slots.iter().find(|s| s.slot == n) {
            Some(s) => CriterionView {
                slot: n,
                question_bank_id: s.question_bank_id,
                custom_text: s.question_text.clone().unwrap_or_default(),
                label: resolve_label(s, bank),
            },
            None => CriterionView {
                slot: n,
                question_bank_id: 0,
                custom_text: String::new(),
                label: String::new(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> HashMap<i64, String> {
        HashMap::from([(7, "Contribution to teamwork".to_string())])
    }

    #[test]
    fn test_bank_choice_wins_over_custom_text() {
        let choice = CriterionChoice {
            question_bank_id: 7,
            custom_text: "ignored".to_string(),
        };
        let slot = slot_for_choice(1, &choice);
        assert_eq!(slot.question_bank_id, 7);
        assert_eq!(slot.question_text, None);
    }

    #[test]
    fn test_custom_text_stored_with_zero_bank_id() {
        let choice = CriterionChoice {
            question_bank_id: 0,
            custom_text: "Communication".to_string(),
        };
        let slot = slot_for_choice(2, &choice);
        assert_eq!(slot.question_bank_id, 0);
        assert_eq!(slot.question_text.as_deref(), Some("Communication"));
    }

    #[test]
    fn test_label_resolution_order() {
        let custom = CriterionSlot {
            slot: 1,
            question_text: Some("Communication".to_string()),
            question_bank_id: 0,
        };
        assert_eq!(resolve_label(&custom, &bank()), "Communication");

        let from_bank = CriterionSlot {
            slot: 2,
            question_text: None,
            question_bank_id: 7,
        };
        assert_eq!(resolve_label(&from_bank, &bank()), "Contribution to teamwork");

        // 题库里查不到的 ID 记空串
        let missing = CriterionSlot {
            slot: 3,
            question_text: None,
            question_bank_id: 99,
        };
        assert_eq!(resolve_label(&missing, &bank()), "");
    }

    #[test]
    fn test_views_fill_undefined_slots() {
        let slots = [CriterionSlot {
            slot: 2,
            question_text: None,
            question_bank_id: 7,
        }];
        let views = criterion_views(&slots, &bank());
        assert_eq!(views.len(), CRITERIA_COUNT);
        assert_eq!(views[0].label, "");
        assert_eq!(views[1].label, "Contribution to teamwork");
        assert_eq!(views[4].label, "");
    }
}
