pub mod csv;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::export::requests::ExportQuery;
use crate::storage::Storage;

pub struct ExportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExportService {
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

    // 导出互评记录或标记表为 CSV
    pub async fn export(
        &self,
        request: &HttpRequest,
        activity_id: i64,
        query: ExportQuery,
    ) -> ActixResult<HttpResponse> {
        csv::export(self, request, activity_id, query).await
    }
}
