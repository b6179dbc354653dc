use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::grades::requests::{CalculateGradeQuery, UpdateGradeRequest};
use crate::services::GradeService;

// 懒加载的全局 GRADE_SERVICE 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// HTTP处理程序
pub async fn calculate(
    req: HttpRequest,
    activity_id: web::Path<i64>,
    query: web::Query<CalculateGradeQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .calculate(&req, activity_id.into_inner(), query.into_inner())
        .await
}

pub async fn list(req: HttpRequest, activity_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list(&req, activity_id.into_inner()).await
}

pub async fn update(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    update_data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    let (activity_id, student_id) = path.into_inner();
    GRADE_SERVICE
        .update(&req, activity_id, student_id, update_data.into_inner())
        .await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    // 对花名册全员重新聚合，?with_analysis=true 时顺带全活动分析
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/grades/calculate")
            .route(web::post().to(calculate)),
    );
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/grades").route(web::get().to(list)),
    );
    // 教师手工覆盖单个学生的聚合结果
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/grades/{student_id}")
            .route(web::put().to(update)),
    );
}
