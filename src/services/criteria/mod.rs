pub mod get;
pub mod questions;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::criteria::requests::SaveCriteriaRequest;
use crate::storage::Storage;

pub struct CriteriaService {
    storage: Option<Arc<dyn Storage>>,
}

impl CriteriaService {
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

    // 读取活动的评分条目定义（含解析后的显示文本）
    pub async fn get(&self, request: &HttpRequest, activity_id: i64) -> ActixResult<HttpResponse> {
        get::get(self, request, activity_id).await
    }

    // 整组覆盖活动的评分条目定义
    pub async fn update(
        &self,
        request: &HttpRequest,
        activity_id: i64,
        data: SaveCriteriaRequest,
    ) -> ActixResult<HttpResponse> {
        update::update(self, request, activity_id, data).await
    }

    // 课程题库列表
    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::list_questions(self, request, course_id).await
    }
}
