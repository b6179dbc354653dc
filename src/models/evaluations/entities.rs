use serde::{Deserialize, Serialize};

/// 固定的评分条目数量
///
/// 评分条目是有序定长槽位（criteria[0] 对应第 1 条），
/// 不使用动态命名字段访问。
pub const CRITERIA_COUNT: usize = 5;

/// 最终互评记录（提交后不可变）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: i64,
    pub activity_id: i64,
    // 打分人
    pub evaluator_id: i64,
    // 被评人（自评时与 evaluator_id 相同）
    pub peer_id: i64,
    // 每条评分 1-5，None 表示未作答
    pub criteria: [Option<i32>; CRITERIA_COUNT],
    // 对被评人的开放评语
    pub comment1: String,
    // 自我反思评语，仅自评行有意义
    pub comment2: String,
    pub created_at: i64,
}

/// 互评草稿（可反复覆盖保存）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: i64,
    pub activity_id: i64,
    pub evaluator_id: i64,
    pub peer_id: i64,
    // 草稿中缺失的评分写 0，不留空
    pub criteria: [i32; CRITERIA_COUNT],
    pub comment1: String,
    pub comment2: Option<String>,
    pub created_at: i64,
    pub modified_at: i64,
}
