use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CriteriaService;
use crate::models::criteria::resolve;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get(
    service: &CriteriaService,
    request: &HttpRequest,
    activity_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let activity = match storage.get_activity_by_id(activity_id).await {
        Ok(Some(activity)) => activity,
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
    };

    let slots = match storage.get_criteria(activity_id).await {
        Ok(slots) => slots,
        Err(e) => {
            error!("查询评分条目失败: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while fetching criteria",
            )));
        }
    };

    let bank = match storage.list_question_bank(activity.course_id).await {
        Ok(bank) => bank,
        Err(e) => {
            error!("查询题库失败: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while fetching question bank",
            )));
        }
    };

    let bank_map: HashMap<i64, String> =
        bank.into_iter().map(|q| (q.id, q.question_text)).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        resolve::criterion_views(&slots, &bank_map),
        "Criteria retrieved",
    )))
}
