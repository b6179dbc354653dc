pub mod analyze;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::analysis::AnalysisGateway;
use crate::storage::Storage;

pub struct FlagService {
    storage: Option<Arc<dyn Storage>>,
}

impl FlagService {
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

    // 手动触发 AI 分析，可选限定单个评分人
    pub async fn analyze(
        &self,
        request: &HttpRequest,
        activity_id: i64,
        evaluator_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        analyze::analyze(self, request, activity_id, evaluator_id).await
    }

    // 列出活动的异常标记
    pub async fn list(&self, request: &HttpRequest, activity_id: i64) -> ActixResult<HttpResponse> {
        list::list(self, request, activity_id).await
    }
}
