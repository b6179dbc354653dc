use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::{error, info, warn};

use super::EvaluationService;
use crate::analysis::{groups, reconciler};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::activities::entities::Activity;
use crate::models::evaluations::{
    entities::CRITERIA_COUNT,
    requests::{NewEvaluation, SubmitEvaluationRequest},
    responses::SubmitResponse,
};
use crate::models::flags::merge::{FlagWrite, SubmissionFlagWrite};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::tasks::AnalysisTask;

/// 把提交请求展开为逐个被评人的最终记录
///
/// 第 1 条评分映射是锚点：被评人集合只取它的键，其余映射里
/// 多出来的键一律忽略。锚点为空时返回空集，按无提交处理。
pub fn build_evaluation_rows(
    activity_id: i64,
    request: &SubmitEvaluationRequest,
    now: i64,
) -> Vec<NewEvaluation> {
    let mut peer_ids: Vec<i64> = request.criteria[0].keys().copied().collect();
    peer_ids.sort_unstable();

    peer_ids
        .into_iter()
        .map(|peer_id| {
            let mut criteria = [None; CRITERIA_COUNT];
            for (slot, map) in criteria.iter_mut().zip(&request.criteria) {
                // 提交路径缺失的评分按 0 落库，不留空
                *slot = Some(map.get(&peer_id).copied().unwrap_or(0));
            }

            NewEvaluation {
                activity_id,
                evaluator_id: request.evaluator_id,
                peer_id,
                criteria,
                comment1: request.comments1.get(&peer_id).cloned().unwrap_or_default(),
                comment2: if peer_id == request.evaluator_id {
                    request.comments2.get(&peer_id).cloned().unwrap_or_default()
                } else {
                    String::new()
                },
                created_at: now,
            }
        })
        .collect()
}

/// 仓促提交判定：从打开表单到提交的用时严格小于阈值
pub fn is_quick_submission(start_time: i64, now: i64, threshold_seconds: i64) -> bool {
    now - start_time < threshold_seconds
}

/// 落库一次提交批次
///
/// 先删本批草稿再写最终记录，清理失败则整个提交失败。
/// 标记行记录的是被评人的小组，逐个被评人单独解析。
pub(crate) async fn persist_submission(
    storage: &Arc<dyn Storage>,
    activity: &Activity,
    evaluator_id: i64,
    rows: Vec<NewEvaluation>,
    quick: bool,
    now: i64,
) -> Result<Vec<i64>> {
    let peer_ids: Vec<i64> = rows.iter().map(|r| r.peer_id).collect();

    storage
        .delete_drafts_for_peers(activity.id, evaluator_id, &peer_ids)
        .await?;

    for row in rows {
        let peer_id = row.peer_id;
        let group = groups::resolve_group(storage.as_ref(), activity, peer_id).await?;

        storage.insert_evaluation(row).await?;

        let write = FlagWrite::Submission(SubmissionFlagWrite {
            activity_id: activity.id,
            evaluator_id,
            peer_id,
            grouping_id: group.grouping_id,
            group_id: group.group_id,
            quick_submission_discrepancy: quick,
            timestamp: now,
        });
        storage.upsert_flag(&write).await?;
    }

    Ok(peer_ids)
}

pub async fn submit(
    service: &EvaluationService,
    request: &HttpRequest,
    activity_id: i64,
    submit_data: SubmitEvaluationRequest,
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

    let now = Utc::now().timestamp();
    let rows = build_evaluation_rows(activity_id, &submit_data, now);

    // 锚点为空：整个请求按无提交处理，不产生任何写入
    if rows.is_empty() {
        info!(
            "提交缺少第 1 条评分，按无提交处理: activity={}, evaluator={}",
            activity_id, submit_data.evaluator_id
        );
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmitResponse {
                submitted: false,
                peers: 0,
                quick_submission: false,
            },
            "Nothing to submit",
        )));
    }

    let config = AppConfig::get();
    let quick = is_quick_submission(
        submit_data.start_time,
        now,
        config.analysis.quick_submission_seconds,
    );

    let peer_ids = match persist_submission(
        &storage,
        &activity,
        submit_data.evaluator_id,
        rows,
        quick,
        now,
    )
    .await
    {
        Ok(peer_ids) => peer_ids,
        Err(e) => {
            error!("提交落库失败: activity={activity_id}: {e}");
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while storing submission",
            )));
        }
    };

    info!(
        "提交完成: activity={}, evaluator={}, peers={}, quick={}",
        activity_id,
        submit_data.evaluator_id,
        peer_ids.len(),
        quick
    );

    // 分析链：同步 -> 入队 -> 直接重试一次，全部失败也只记日志
    let gateway = service.get_gateway(request);
    if let Err(e) = reconciler::run_analysis(
        &storage,
        &gateway,
        activity_id,
        Some(submit_data.evaluator_id),
    )
    .await
    {
        warn!("同步分析失败，转入后台任务: {e}");
        let task = AnalysisTask {
            activity_id,
            evaluator_id: Some(submit_data.evaluator_id),
        };
        if let Err(qe) = service.get_tasks(request).enqueue(task) {
            warn!("分析任务入队失败，直接重试一次: {qe}");
            if let Err(re) = reconciler::run_analysis(
                &storage,
                &gateway,
                activity_id,
                Some(submit_data.evaluator_id),
            )
            .await
            {
                error!("分析重试仍然失败: {re}");
            }
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmitResponse {
            submitted: true,
            peers: peer_ids.len(),
            quick_submission: quick,
        },
        "Evaluation submitted",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::entities::GroupMembership;
    use crate::storage::mock::MockStorage;
    use std::collections::HashMap;

    fn activity(id: i64, course_id: i64) -> Activity {
        Activity {
            id,
            course_id,
            name: "peer eval".to_string(),
            grouping_id: None,
            linked_assignment_id: None,
            created_at: 0,
            modified_at: 0,
        }
    }

    fn membership(grouping_id: i64, group_id: i64) -> GroupMembership {
        GroupMembership {
            grouping_id,
            group_id,
        }
    }

    fn request_with(
        evaluator_id: i64,
        start_time: i64,
        criteria1: &[(i64, i32)],
        criteria2: &[(i64, i32)],
    ) -> SubmitEvaluationRequest {
        let mut criteria: [HashMap<i64, i32>; CRITERIA_COUNT] = Default::default();
        criteria[0] = criteria1.iter().copied().collect();
        criteria[1] = criteria2.iter().copied().collect();
        SubmitEvaluationRequest {
            evaluator_id,
            start_time,
            criteria,
            comments1: HashMap::new(),
            comments2: HashMap::new(),
        }
    }

    #[test]
    fn test_anchor_decides_peer_set() {
        // criteria2 里多出来的 peer 9 被忽略
        let req = request_with(1, 0, &[(2, 4), (3, 5)], &[(2, 3), (9, 1)]);
        let rows = build_evaluation_rows(10, &req, 100);
        let peers: Vec<i64> = rows.iter().map(|r| r.peer_id).collect();
        assert_eq!(peers, vec![2, 3]);
    }

    #[test]
    fn test_empty_anchor_means_no_submission() {
        let req = request_with(1, 0, &[], &[(2, 3)]);
        assert!(build_evaluation_rows(10, &req, 100).is_empty());
    }

    #[test]
    fn test_missing_criteria_stored_as_zero() {
        let req = request_with(1, 0, &[(2, 4)], &[]);
        let rows = build_evaluation_rows(10, &req, 100);
        assert_eq!(rows[0].criteria, [Some(4), Some(0), Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn test_quick_submission_boundary() {
        // 阈值 180：179 秒算仓促，180 秒不算
        assert!(is_quick_submission(1000, 1179, 180));
        assert!(!is_quick_submission(1000, 1180, 180));
    }

    #[test]
    fn test_self_row_keeps_reflection() {
        let mut req = request_with(1, 0, &[(1, 5), (2, 4)], &[]);
        req.comments2.insert(1, "reflection".to_string());
        req.comments2.insert(2, "ignored".to_string());
        let rows = build_evaluation_rows(10, &req, 100);
        let self_row = rows.iter().find(|r| r.peer_id == 1).unwrap();
        let peer_row = rows.iter().find(|r| r.peer_id == 2).unwrap();
        assert_eq!(self_row.comment2, "reflection");
        assert_eq!(peer_row.comment2, "");
    }

    #[tokio::test]
    async fn test_flags_carry_each_peer_group() {
        let mock = Arc::new(MockStorage {
            groups_by_user: HashMap::from([
                (1, vec![membership(0, 100)]),
                (2, vec![membership(0, 200)]),
                (3, vec![membership(0, 300)]),
            ]),
            ..Default::default()
        });
        let storage: Arc<dyn Storage> = mock.clone();

        let rows = build_evaluation_rows(10, &request_with(1, 0, &[(2, 4), (3, 5)], &[]), 100);
        persist_submission(&storage, &activity(10, 7), 1, rows, false, 100)
            .await
            .unwrap();

        // 每行标记记录对应被评人自己的小组，而不是评分人的
        let flags = mock.flags.lock().unwrap();
        let for_peer = |peer_id: i64| flags.iter().find(|f| f.peer_id == peer_id).unwrap();
        assert_eq!(for_peer(2).group_id, 200);
        assert_eq!(for_peer(3).group_id, 300);
    }

    #[tokio::test]
    async fn test_failed_draft_cleanup_aborts_submission() {
        let mock = Arc::new(MockStorage {
            fail_draft_delete: true,
            ..Default::default()
        });
        let storage: Arc<dyn Storage> = mock.clone();

        let rows = build_evaluation_rows(10, &request_with(1, 0, &[(2, 4)], &[]), 100);
        let result = persist_submission(&storage, &activity(10, 7), 1, rows, false, 100).await;

        // 草稿清理先于最终记录写入，失败时不产生任何最终记录或标记
        assert!(result.is_err());
        assert!(mock.evaluations.lock().unwrap().is_empty());
        assert!(mock.flags.lock().unwrap().is_empty());
    }
}
