use serde::Deserialize;

use crate::models::evaluations::entities::CRITERIA_COUNT;

/// 手工修改成绩请求（教师直接覆盖聚合结果）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGradeRequest {
    #[serde(default)]
    pub criteria: [Option<f64>; CRITERIA_COUNT],
    pub final_grade: Option<f64>,
}

/// 存储层使用的聚合成绩写入（delete+insert 整行替换）
#[derive(Debug, Clone, PartialEq)]
pub struct NewAggregateGrade {
    pub student_id: i64,
    pub criteria: [f64; CRITERIA_COUNT],
    pub final_grade: f64,
}

/// 聚合触发参数
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateGradeQuery {
    // 聚合完成后是否顺带执行全活动 AI 分析
    #[serde(default)]
    pub with_analysis: bool,
}
