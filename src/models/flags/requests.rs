use serde::Deserialize;

/// 手动分析参数
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeQuery {
    // 缺省时分析整个活动
    pub evaluator_id: Option<i64>,
}
