use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::GradeService;
use crate::models::grades::requests::UpdateGradeRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update(
    service: &GradeService,
    request: &HttpRequest,
    activity_id: i64,
    student_id: i64,
    update_data: UpdateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .update_aggregate_grade(activity_id, student_id, update_data)
        .await
    {
        Ok(Some(grade)) => {
            info!("成绩已手工覆盖: activity={activity_id}, student={student_id}");
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "No grade row for this student, run calculation first",
        ))),
        Err(e) => {
            error!("成绩更新失败: activity={activity_id}, student={student_id}: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while updating grade",
            )))
        }
    }
}
