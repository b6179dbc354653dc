use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::export::requests::ExportQuery;
use crate::services::ExportService;

// 懒加载的全局 EXPORT_SERVICE 实例
static EXPORT_SERVICE: Lazy<ExportService> = Lazy::new(ExportService::new_lazy);

// HTTP处理程序
pub async fn export(
    req: HttpRequest,
    activity_id: web::Path<i64>,
    query: web::Query<ExportQuery>,
) -> ActixResult<HttpResponse> {
    EXPORT_SERVICE
        .export(&req, activity_id.into_inner(), query.into_inner())
        .await
}

// 配置路由
pub fn configure_export_routes(cfg: &mut web::ServiceConfig) {
    // ?table=evaluations|flags 选择导出的表
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/export").route(web::get().to(export)),
    );
}
