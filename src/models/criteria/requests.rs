use serde::Deserialize;

use crate::models::evaluations::entities::CRITERIA_COUNT;

/// 单个槽位的选择：题库题目或自定义文本
///
/// question_bank_id 大于 0 时视为选了题库题目，custom_text 被忽略。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriterionChoice {
    #[serde(default)]
    pub question_bank_id: i64,
    #[serde(default)]
    pub custom_text: String,
}

/// 保存评分条目定义请求（整组覆盖全部槽位）
#[derive(Debug, Clone, Deserialize)]
pub struct SaveCriteriaRequest {
    pub slots: [CriterionChoice; CRITERIA_COUNT],
}
