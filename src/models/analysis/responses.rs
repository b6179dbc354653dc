use serde::Deserialize;

/// 外部分析服务的响应体
///
/// 仅接受 status 为 "success" 且 results 非空的响应，
/// 其他任何形态（包括语法合法但语义不符的）一律按无结果处理。
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<AnalysisResultEntry>,
}

impl AnalysisResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success" && !self.results.is_empty()
    }
}

/// 单个 (evaluator, peer) 对的分析结果
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResultEntry {
    pub evaluator_id: i64,
    pub peer_id: i64,
    #[serde(default)]
    pub comment_discrepancy_detected: bool,
    #[serde(default)]
    pub mark_discrepancy_detected: bool,
    // 缺省表示无异常（类别 1）
    pub misbehaviour_category_index: Option<i32>,
    // 分析自身的时间戳，落库时优先于本地时钟
    #[serde(default)]
    pub analysis_timestamp: i64,
    // 带错误标记的条目整条跳过
    pub error: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_parses() {
        let body = r#"{
            "status": "success",
            "results": [{
                "evaluator_id": 1,
                "peer_id": 2,
                "comment_discrepancy_detected": true,
                "mark_discrepancy_detected": false,
                "analysis_timestamp": 1700000000
            }]
        }"#;
        let resp: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(resp.is_success());
        let entry = &resp.results[0];
        assert!(entry.comment_discrepancy_detected);
        assert!(entry.misbehaviour_category_index.is_none());
        assert!(entry.error.is_none());
    }

    #[test]
    fn test_non_success_status_is_rejected() {
        let body = r#"{"status": "error", "results": []}"#;
        let resp: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.is_success());
    }

    #[test]
    fn test_success_with_empty_results_is_rejected() {
        let body = r#"{"status": "success", "results": []}"#;
        let resp: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.is_success());
    }

    #[test]
    fn test_entry_error_marker_parses() {
        let body = r#"{
            "status": "success",
            "results": [{
                "evaluator_id": 3,
                "peer_id": 4,
                "error": "model failure"
            }]
        }"#;
        let resp: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(resp.results[0].error.is_some());
    }
}
