use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CriteriaService;
use crate::models::criteria::{
    entities::CriterionSlot, requests::SaveCriteriaRequest, resolve,
};
use crate::models::{ApiResponse, ErrorCode};

pub async fn update(
    service: &CriteriaService,
    request: &HttpRequest,
    activity_id: i64,
    data: SaveCriteriaRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let activity = match storage.get_activity_by_id(activity_id).await {
        Ok(Some(activity)) => activity,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ActivityNotFound,
                "Activity not found",
            )));
        }
        Err(e) => {
            error!("查询活动失败: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while fetching activity",
            )));
        }
    };

    let slots: Vec<CriterionSlot> = data
        .slots
        .iter()
        .enumerate()
        .map(|(i, choice)| resolve::slot_for_choice(i as i32 + 1, choice))
        .collect();

    if let Err(e) = storage.save_criteria(activity_id, &slots).await {
        error!("保存评分条目失败: activity={activity_id}: {e}");
        return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "Internal server error while storing criteria",
        )));
    }

    info!("评分条目定义已更新: activity={activity_id}");

    // 回传与 GET 相同形态的视图，方便前端直接刷新表单
    let bank_map: HashMap<i64, String> = match storage
        .list_question_bank(activity.course_id)
        .await
    {
        Ok(bank) => bank.into_iter().map(|q| (q.id, q.question_text)).collect(),
        Err(e) => {
            error!("查询题库失败: {e}");
            HashMap::new()
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        resolve::criterion_views(&slots, &bank_map),
        "Criteria saved",
    )))
}
