use serde::Serialize;

/// 单条评分条目的视图
///
/// question_bank_id / custom_text 用于教师表单回填，
/// label 是学生实际看到的条目文本。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionView {
    pub slot: i32,
    pub question_bank_id: i64,
    pub custom_text: String,
    pub label: String,
}
