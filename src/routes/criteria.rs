use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::criteria::requests::SaveCriteriaRequest;
use crate::services::CriteriaService;

// 懒加载的全局 CRITERIA_SERVICE 实例
static CRITERIA_SERVICE: Lazy<CriteriaService> = Lazy::new(CriteriaService::new_lazy);

// HTTP处理程序
pub async fn get_criteria(
    req: HttpRequest,
    activity_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE.get(&req, activity_id.into_inner()).await
}

pub async fn update_criteria(
    req: HttpRequest,
    activity_id: web::Path<i64>,
    criteria_data: web::Json<SaveCriteriaRequest>,
) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE
        .update(&req, activity_id.into_inner(), criteria_data.into_inner())
        .await
}

pub async fn list_questions(
    req: HttpRequest,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE
        .list_questions(&req, course_id.into_inner())
        .await
}

// 配置路由
pub fn configure_criteria_routes(cfg: &mut web::ServiceConfig) {
    // 教师配置每个槽位的条目文本，GET 同时返回解析后的显示文本
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/criteria")
            .route(web::get().to(get_criteria))
            .route(web::put().to(update_criteria)),
    );
    // 课程题库，教师挑选预定义条目用
    cfg.service(
        web::resource("/api/v1/courses/{course_id}/questions")
            .route(web::get().to(list_questions)),
    );
}
