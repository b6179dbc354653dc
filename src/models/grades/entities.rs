use serde::{Deserialize, Serialize};

use crate::models::evaluations::entities::CRITERIA_COUNT;

/// 聚合成绩
///
/// final_grade 是合并均值（所有非空分值求和 / 非空计数），
/// 不是五条均值的再平均：各条应答人数不同时二者数值不同，
/// 这是有意为之的设计选择。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateGrade {
    pub id: i64,
    pub activity_id: i64,
    pub student_id: i64,
    // 每条评分的均值，无人作答时为 0
    pub criteria: [f64; CRITERIA_COUNT],
    pub final_grade: f64,
}
