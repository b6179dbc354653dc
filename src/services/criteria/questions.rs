use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CriteriaService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_questions(
    service: &CriteriaService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_question_bank(course_id).await {
        Ok(questions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            questions,
            "Questions retrieved",
        ))),
        Err(e) => {
            error!("查询题库失败: course={course_id}: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while fetching question bank",
            )))
        }
    }
}
