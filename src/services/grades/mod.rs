pub mod aggregate;
pub mod calculate;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::analysis::AnalysisGateway;
use crate::models::grades::requests::{CalculateGradeQuery, UpdateGradeRequest};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    // 对整个活动重新聚合成绩（覆盖花名册全员）
    pub async fn calculate(
        &self,
        request: &HttpRequest,
        activity_id: i64,
        query: CalculateGradeQuery,
    ) -> ActixResult<HttpResponse> {
        calculate::calculate(self, request, activity_id, query).await
    }

    // 列出活动成绩
    pub async fn list(&self, request: &HttpRequest, activity_id: i64) -> ActixResult<HttpResponse> {
        list::list(self, request, activity_id).await
    }

    // 教师手工覆盖单个学生的成绩
    pub async fn update(
        &self,
        request: &HttpRequest,
        activity_id: i64,
        student_id: i64,
        update_data: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update(self, request, activity_id, student_id, update_data).await
    }
}
