use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::flags::requests::AnalyzeQuery;
use crate::services::FlagService;

// 懒加载的全局 FLAG_SERVICE 实例
static FLAG_SERVICE: Lazy<FlagService> = Lazy::new(FlagService::new_lazy);

// HTTP处理程序
pub async fn analyze(
    req: HttpRequest,
    activity_id: web::Path<i64>,
    query: web::Query<AnalyzeQuery>,
) -> ActixResult<HttpResponse> {
    FLAG_SERVICE
        .analyze(&req, activity_id.into_inner(), query.evaluator_id)
        .await
}

pub async fn list(req: HttpRequest, activity_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    FLAG_SERVICE.list(&req, activity_id.into_inner()).await
}

// 配置路由
pub fn configure_flags_routes(cfg: &mut web::ServiceConfig) {
    // 手动触发 AI 分析，?evaluator_id= 限定单个评分人
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/analyze").route(web::post().to(analyze)),
    );
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/flags").route(web::get().to(list)),
    );
}
