use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EvaluationService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_submission(
    service: &EvaluationService,
    request: &HttpRequest,
    activity_id: i64,
    evaluator_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_submission(activity_id, evaluator_id).await {
        Ok(true) => {
            info!("提交已删除: activity={activity_id}, evaluator={evaluator_id}");
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Submission deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "No submission found for this evaluator",
        ))),
        Err(e) => {
            error!("删除提交失败: activity={activity_id}, evaluator={evaluator_id}: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while deleting submission",
            )))
        }
    }
}
