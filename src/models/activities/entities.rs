use serde::{Deserialize, Serialize};

/// 用户的一条小组归属
///
/// grouping_id 为 0 表示该小组不属于任何分组方案。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub grouping_id: i64,
    pub group_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    // 唯一 ID
    pub id: i64,
    // 所属课程 ID
    pub course_id: i64,
    // 活动名称
    pub name: String,
    // 直接绑定的分组方案 ID（与 linked_assignment_id 互斥）
    pub grouping_id: Option<i64>,
    // 链接的外部作业 ID（沿用其分组方案）
    pub linked_assignment_id: Option<i64>,
    // 创建时间（Unix 秒）
    pub created_at: i64,
    // 最后修改时间（Unix 秒）
    pub modified_at: i64,
}
