use std::collections::BTreeSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::{error, info};

use super::EvaluationService;
use crate::models::evaluations::{
    entities::CRITERIA_COUNT,
    requests::{NewDraft, SaveDraftRequest},
    responses::DraftSaveResponse,
};
use crate::models::{ApiResponse, ErrorCode};

/// 把草稿请求展开为逐个被评人的整行写入
///
/// 被评人集合取全部评分映射与评语映射键的并集，按 ID 升序。
/// 缺失的评分写 0；comment2 是自我反思，只落在自评行上。
pub fn build_draft_rows(
    activity_id: i64,
    request: &SaveDraftRequest,
    now: i64,
) -> Vec<NewDraft> {
    let mut peer_ids: BTreeSet<i64> = BTreeSet::new();
    for map in &request.criteria {
        peer_ids.extend(map.keys().copied());
    }
    peer_ids.extend(request.comments1.keys().copied());
    peer_ids.extend(request.comments2.keys().copied());

    peer_ids
        .into_iter()
        .map(|peer_id| {
            let mut criteria = [0i32; CRITERIA_COUNT];
            for (slot, map) in criteria.iter_mut().zip(&request.criteria) {
                *slot = map.get(&peer_id).copied().unwrap_or(0);
            }

            NewDraft {
                activity_id,
                evaluator_id: request.evaluator_id,
                peer_id,
                criteria,
                comment1: request.comments1.get(&peer_id).cloned().unwrap_or_default(),
                comment2: if peer_id == request.evaluator_id {
                    request.comments2.get(&peer_id).cloned()
                } else {
                    None
                },
                modified_at: now,
            }
        })
        .collect()
}

pub async fn save_draft(
    service: &EvaluationService,
    request: &HttpRequest,
    activity_id: i64,
    draft_data: SaveDraftRequest,
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

    let rows = build_draft_rows(activity_id, &draft_data, Utc::now().timestamp());

    // 逐行尽力写入，失败不回滚已写入的行
    let mut saved = true;
    let mut written = 0usize;
    for row in rows {
        match storage.upsert_draft(row).await {
            Ok(()) => written += 1,
            Err(e) => {
                error!("草稿写入失败: activity={activity_id}: {e}");
                saved = false;
            }
        }
    }

    info!(
        "草稿保存: activity={}, evaluator={}, rows={}, saved={}",
        activity_id, draft_data.evaluator_id, written, saved
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DraftSaveResponse {
            saved,
            rows: written,
        },
        "Draft saved",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn request_with(
        evaluator_id: i64,
        criteria1: &[(i64, i32)],
        criteria3: &[(i64, i32)],
        comments1: &[(i64, &str)],
        comments2: &[(i64, &str)],
    ) -> SaveDraftRequest {
        let mut criteria: [HashMap<i64, i32>; CRITERIA_COUNT] = Default::default();
        criteria[0] = criteria1.iter().copied().collect();
        criteria[2] = criteria3.iter().copied().collect();
        SaveDraftRequest {
            evaluator_id,
            criteria,
            comments1: comments1
                .iter()
                .map(|(id, c)| (*id, c.to_string()))
                .collect(),
            comments2: comments2
                .iter()
                .map(|(id, c)| (*id, c.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_rows_cover_union_of_keys_sorted() {
        let req = request_with(1, &[(3, 4)], &[(2, 5)], &[(5, "late")], &[]);
        let rows = build_draft_rows(10, &req, 100);
        let peers: Vec<i64> = rows.iter().map(|r| r.peer_id).collect();
        assert_eq!(peers, vec![2, 3, 5]);
    }

    #[test]
    fn test_missing_criteria_default_to_zero() {
        let req = request_with(1, &[(2, 4)], &[(2, 5)], &[], &[]);
        let rows = build_draft_rows(10, &req, 100);
        assert_eq!(rows[0].criteria, [4, 0, 5, 0, 0]);
    }

    #[test]
    fn test_comment2_only_on_self_row() {
        let req = request_with(
            1,
            &[(1, 5), (2, 4)],
            &[],
            &[],
            &[(1, "my reflection"), (2, "ignored")],
        );
        let rows = build_draft_rows(10, &req, 100);
        let self_row = rows.iter().find(|r| r.peer_id == 1).unwrap();
        let peer_row = rows.iter().find(|r| r.peer_id == 2).unwrap();
        assert_eq!(self_row.comment2.as_deref(), Some("my reflection"));
        assert_eq!(peer_row.comment2, None);
    }

    #[test]
    fn test_empty_request_yields_no_rows() {
        let req = request_with(1, &[], &[], &[], &[]);
        assert!(build_draft_rows(10, &req, 100).is_empty());
    }
}
