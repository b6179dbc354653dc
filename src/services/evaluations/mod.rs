pub mod delete;
pub mod drafts;
pub mod save_draft;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::analysis::AnalysisGateway;
use crate::models::evaluations::requests::{SaveDraftRequest, SubmitEvaluationRequest};
use crate::storage::Storage;
use crate::tasks::TaskQueue;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_gateway(&self, request: &HttpRequest) -> Arc<AnalysisGateway> {
        request
            .app_data::<actix_web::web::Data<Arc<AnalysisGateway>>>()
            .expect("AnalysisGateway not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_tasks(&self, request: &HttpRequest) -> TaskQueue {
        request
            .app_data::<actix_web::web::Data<TaskQueue>>()
            .expect("TaskQueue not found in app data")
            .get_ref()
            .clone()
    }

    // 保存草稿（整行覆盖）
    pub async fn save_draft(
        &self,
        request: &HttpRequest,
        activity_id: i64,
        draft_data: SaveDraftRequest,
    ) -> ActixResult<HttpResponse> {
        save_draft::save_draft(self, request, activity_id, draft_data).await
    }

    // 评分人读回自己的草稿（打开表单时回填）
    pub async fn list_drafts(
        &self,
        request: &HttpRequest,
        activity_id: i64,
        evaluator_id: i64,
    ) -> ActixResult<HttpResponse> {
        drafts::list_drafts(self, request, activity_id, evaluator_id).await
    }

    // 最终提交（不可变记录 + 仓促提交标记 + 触发分析）
    pub async fn submit(
        &self,
        request: &HttpRequest,
        activity_id: i64,
        submit_data: SubmitEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit(self, request, activity_id, submit_data).await
    }

    // 管理员删除某评分人的提交（级联标记与成绩）
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        activity_id: i64,
        evaluator_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, activity_id, evaluator_id).await
    }
}
