use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::evaluations::requests::{DraftQuery, SaveDraftRequest, SubmitEvaluationRequest};
use crate::services::EvaluationService;

// 懒加载的全局 EVALUATION_SERVICE 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// HTTP处理程序
pub async fn save_draft(
    req: HttpRequest,
    activity_id: web::Path<i64>,
    draft_data: web::Json<SaveDraftRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .save_draft(&req, activity_id.into_inner(), draft_data.into_inner())
        .await
}

pub async fn list_drafts(
    req: HttpRequest,
    activity_id: web::Path<i64>,
    query: web::Query<DraftQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_drafts(&req, activity_id.into_inner(), query.evaluator_id)
        .await
}

pub async fn submit(
    req: HttpRequest,
    activity_id: web::Path<i64>,
    submit_data: web::Json<SubmitEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .submit(&req, activity_id.into_inner(), submit_data.into_inner())
        .await
}

pub async fn delete_submission(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (activity_id, evaluator_id) = path.into_inner();
    EVALUATION_SERVICE
        .delete_submission(&req, activity_id, evaluator_id)
        .await
}

// 配置路由
//
// 各业务域共享 /api/v1/activities/{activity_id} 前缀，
// 这里用完整路径注册，避免同前缀 scope 互相遮蔽。
pub fn configure_evaluations_routes(cfg: &mut web::ServiceConfig) {
    // 评分人反复保存的工作副本，GET 用于打开表单时回填
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/draft")
            .route(web::post().to(save_draft))
            .route(web::get().to(list_drafts)),
    );
    // 最终提交，落不可变记录并触发分析
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/submit").route(web::post().to(submit)),
    );
    // 管理员移除某评分人的全部提交痕迹
    cfg.service(
        web::resource("/api/v1/activities/{activity_id}/submissions/{evaluator_id}")
            .route(web::delete().to(delete_submission)),
    );
}
