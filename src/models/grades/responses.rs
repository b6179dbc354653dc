use serde::{Deserialize, Serialize};

use super::entities::AggregateGrade;
use crate::models::flags::entities::Flag;

/// 成绩列表行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeListItem {
    #[serde(flatten)]
    pub grade: AggregateGrade,
    // 最终成绩落在低分预警区间内（区间可配置）
    pub below_expectation: bool,
}

/// 成绩列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeListResponse {
    pub items: Vec<GradeListItem>,
}

/// 聚合运行结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateGradeResponse {
    // 本次写入的成绩行数（等于花名册人数）
    pub graded_students: usize,
    // with_analysis 时返回已落库的标记记录，分析失败时为空
    pub analysis_results: Vec<Flag>,
}
