use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GradeService;
use crate::config::AppConfig;
use crate::models::grades::responses::{GradeListItem, GradeListResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 低分预警判定：最终成绩落在开区间 (low, high) 内
///
/// 全 0 行（无人评价）不触发预警。
pub fn below_expectation(final_grade: f64, low: f64, high: f64) -> bool {
    final_grade > low && final_grade < high
}

pub async fn list(
    service: &GradeService,
    request: &HttpRequest,
    activity_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_activity_by_id(activity_id).await {
        Ok(Some(_)) => {}
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
    }

    let grades = match storage.list_aggregate_grades(activity_id).await {
        Ok(grades) => grades,
        Err(e) => {
            error!("查询成绩列表失败: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while fetching grades",
            )));
        }
    };

    let config = AppConfig::get();
    let items: Vec<GradeListItem> = grades
        .into_iter()
        .map(|grade| {
            let flagged = below_expectation(
                grade.final_grade,
                config.analysis.mark_discrepancy_low,
                config.analysis.mark_discrepancy_high,
            );
            GradeListItem {
                grade,
                below_expectation: flagged,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeListResponse { items },
        "Grades retrieved",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_is_exclusive_on_both_ends() {
        assert!(!below_expectation(0.0, 0.0, 2.5));
        assert!(below_expectation(0.01, 0.0, 2.5));
        assert!(below_expectation(2.49, 0.0, 2.5));
        assert!(!below_expectation(2.5, 0.0, 2.5));
        assert!(!below_expectation(4.0, 0.0, 2.5));
    }
}
