use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::{GradeService, aggregate};
use crate::analysis::reconciler;
use crate::models::grades::{requests::CalculateGradeQuery, responses::CalculateGradeResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 顺带分析只在本轮确实写出了成绩行时才触发
pub fn should_analyze(with_analysis: bool, graded_students: usize) -> bool {
    with_analysis && graded_students > 0
}

pub async fn calculate(
    service: &GradeService,
    request: &HttpRequest,
    activity_id: i64,
    query: CalculateGradeQuery,
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

    // 花名册全员都写成绩行，未被评价的学生得全 0 行
    let roster = match storage.list_enrolled_user_ids(activity.course_id).await {
        Ok(roster) => roster,
        Err(e) => {
            error!("查询花名册失败: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while fetching roster",
            )));
        }
    };

    let evaluations = match storage.list_evaluations(activity_id, None).await {
        Ok(evaluations) => evaluations,
        Err(e) => {
            error!("查询互评记录失败: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while fetching evaluations",
            )));
        }
    };

    let mut graded = 0usize;
    for student_id in &roster {
        let grade = aggregate::aggregate_for_student(&evaluations, *student_id);
        if let Err(e) = storage.replace_aggregate_grade(activity_id, grade).await {
            error!("成绩写入失败: activity={activity_id}, student={student_id}: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while storing grades",
            )));
        }
        graded += 1;
    }

    info!("成绩聚合完成: activity={activity_id}, students={graded}");

    // 顺带分析是尽力而为：失败只记日志，成绩结果照常返回
    let analysis_results = if should_analyze(query.with_analysis, graded) {
        let gateway = service.get_gateway(request);
        match reconciler::run_analysis(&storage, &gateway, activity_id, None).await {
            Ok(flags) => flags,
            Err(e) => {
                warn!("聚合后的全活动分析失败: {e}");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CalculateGradeResponse {
            graded_students: graded,
            analysis_results,
        },
        "Grades calculated",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_requires_graded_students() {
        // 空花名册聚合出零行成绩时不触发分析
        assert!(!should_analyze(true, 0));
        assert!(should_analyze(true, 1));
        assert!(!should_analyze(false, 3));
    }
}
