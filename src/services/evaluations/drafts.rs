use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EvaluationService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_drafts(
    service: &EvaluationService,
    request: &HttpRequest,
    activity_id: i64,
    evaluator_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_activity_by_id(activity_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ActivityNotFound,
                "Activity not found",
            )));
        }
        Err(e) => {
            error!("查询活动失败: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while fetching activity",
            )));
        }
    }

    match storage.list_drafts(activity_id, evaluator_id).await {
        Ok(drafts) => Ok(HttpResponse::Ok().json(ApiResponse::success(drafts, "Drafts retrieved"))),
        Err(e) => {
            error!("查询草稿列表失败: activity={activity_id}, evaluator={evaluator_id}: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while fetching drafts",
            )))
        }
    }
}
