//! 外部分析服务的 HTTP 网关
//!
//! 协议：POST 一个 JSON 数组（每条互评一条记录），响应体形如
//! `{"status": "success", "results": [...]}`。任何传输错误、
//! 非 2xx 状态、解析失败或语义不符的响应都视为"无结果"。

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::analysis::{
    requests::AnalysisRequestRecord,
    responses::{AnalysisResponse, AnalysisResultEntry},
};

/// 分析服务客户端
///
/// 内部复用单个 reqwest 连接池，超时取自配置。
pub struct AnalysisGateway {
    client: Client,
    api_url: String,
}

impl AnalysisGateway {
    /// 按全局配置构建网关
    pub fn from_config() -> Self {
        let config = AppConfig::get();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.analysis.timeout))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_url: config.analysis.api_url.clone(),
        }
    }

    /// 调用分析服务
    ///
    /// 成功时返回结果条目，任何失败都返回 None（调用方按无结果继续）。
    pub async fn analyze(
        &self,
        records: &[AnalysisRequestRecord],
    ) -> Option<Vec<AnalysisResultEntry>> {
        if records.is_empty() {
            return None;
        }

        debug!("调用分析服务: {} 条记录 -> {}", records.len(), self.api_url);

        let response = match self
            .client
            .post(&self.api_url)
            .json(records)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!("分析服务调用失败: {e}");
                return None;
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!("分析服务响应读取失败: {e}");
                return None;
            }
        };

        parse_analysis_response(status, &body)
    }
}

/// 解析分析服务的响应
///
/// 非 2xx 状态、JSON 解析失败、语义不符（status 非 "success"
/// 或 results 为空）都返回 None。
pub fn parse_analysis_response(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Option<Vec<AnalysisResultEntry>> {
    if !status.is_success() {
        warn!("分析服务返回非成功状态: {status}");
        return None;
    }

    let body: AnalysisResponse = match serde_json::from_slice(body) {
        Ok(body) => body,
        Err(e) => {
            warn!("分析服务响应解析失败: {e}");
            return None;
        }
    };

    if !body.is_success() {
        warn!(
            "分析服务响应语义不符: status={}, results={}",
            body.status,
            body.results.len()
        );
        return None;
    }

    Some(body.results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_malformed_body_yields_no_entries() {
        assert!(parse_analysis_response(StatusCode::OK, b"not json at all").is_none());
        assert!(parse_analysis_response(StatusCode::OK, b"{\"status\":").is_none());
    }

    #[test]
    fn test_non_success_status_yields_no_entries() {
        // 响应体合法也不行
        let body = br#"{"status": "success", "results": [{"evaluator_id": 1, "peer_id": 2}]}"#;
        assert!(parse_analysis_response(StatusCode::INTERNAL_SERVER_ERROR, body).is_none());
        assert!(parse_analysis_response(StatusCode::BAD_GATEWAY, body).is_none());
    }

    #[test]
    fn test_semantic_mismatch_yields_no_entries() {
        let error_status = br#"{"status": "error", "results": []}"#;
        assert!(parse_analysis_response(StatusCode::OK, error_status).is_none());

        let empty_results = br#"{"status": "success", "results": []}"#;
        assert!(parse_analysis_response(StatusCode::OK, empty_results).is_none());
    }

    #[test]
    fn test_success_body_parses() {
        let body = br#"{"status": "success", "results": [{"evaluator_id": 1, "peer_id": 2}]}"#;
        let entries = parse_analysis_response(StatusCode::OK, body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!((entries[0].evaluator_id, entries[0].peer_id), (1, 2));
    }
}
