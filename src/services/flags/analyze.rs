use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::FlagService;
use crate::analysis::reconciler;
use crate::errors::PeerEvalError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn analyze(
    service: &FlagService,
    request: &HttpRequest,
    activity_id: i64,
    evaluator_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let gateway = service.get_gateway(request);

    match reconciler::run_analysis(&storage, &gateway, activity_id, evaluator_id).await {
        Ok(flags) => {
            info!("手动分析完成: activity={activity_id}, flags={}", flags.len());
            Ok(HttpResponse::Ok().json(ApiResponse::success(flags, "Analysis completed")))
        }
        // 分析服务不可用不算请求失败，返回空结果
        Err(PeerEvalError::AnalysisGateway(msg)) => {
            warn!("手动分析无结果: {msg}");
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                Vec::<crate::models::flags::entities::Flag>::new(),
                "Analysis service unavailable, no results",
            )))
        }
        Err(PeerEvalError::NotFound(msg)) => {
            warn!("手动分析目标不存在: {msg}");
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ActivityNotFound,
                "Activity not found",
            )))
        }
        Err(e) => {
            error!("手动分析失败: activity={activity_id}: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while running analysis",
            )))
        }
    }
}
