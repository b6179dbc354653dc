use serde::{Deserialize, Serialize};

/// 题库中的一道预定义题目（课程级，外部协作方维护）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankQuestion {
    pub id: i64,
    pub course_id: i64,
    pub question_text: String,
    // 开放题用于评语栏，封闭题用于评分条目
    pub is_open_question: bool,
}

/// 活动的一条评分条目定义
///
/// question_text 与 question_bank_id 互斥：选了题库题目时文本为 None，
/// 自定义文本时题库 ID 记 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSlot {
    // 槽位编号，从 1 起始
    pub slot: i32,
    pub question_text: Option<String>,
    pub question_bank_id: i64,
}
