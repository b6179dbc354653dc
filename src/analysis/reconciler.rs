//! 分析结果落库
//!
//! 把分析服务返回的条目转换成标记写入并逐条 upsert。
//! 带错误标记的条目整条跳过，只记日志。

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::analysis::{AnalysisGateway, groups};
use crate::errors::{PeerEvalError, Result};
use crate::models::activities::entities::{Activity, GroupMembership};
use crate::models::analysis::{requests::AnalysisRequestRecord, responses::AnalysisResultEntry};
use crate::models::flags::{
    entities::{Flag, MISBEHAVIOUR_NORMAL},
    merge::{AnalysisFlagWrite, FlagWrite},
};
use crate::storage::Storage;

/// 把单个分析条目转换成标记写入
///
/// 条目自带错误标记时返回 None。时间戳优先取分析侧的，
/// 缺省（0）时退回本地时钟。
pub fn flag_write_for_entry(
    activity_id: i64,
    group: GroupMembership,
    entry: &AnalysisResultEntry,
    now: i64,
) -> Option<FlagWrite> {
    if entry.error.is_some() {
        return None;
    }

    Some(FlagWrite::Analysis(AnalysisFlagWrite {
        activity_id,
        evaluator_id: entry.evaluator_id,
        peer_id: entry.peer_id,
        grouping_id: group.grouping_id,
        group_id: group.group_id,
        comment_discrepancy: entry.comment_discrepancy_detected,
        mark_discrepancy: entry.mark_discrepancy_detected,
        misbehaviour_category: entry
            .misbehaviour_category_index
            .unwrap_or(MISBEHAVIOUR_NORMAL),
        timestamp: if entry.analysis_timestamp > 0 {
            entry.analysis_timestamp
        } else {
            now
        },
    }))
}

/// 把一批分析结果落回标记表，返回落库后的标记行
pub async fn apply_results(
    storage: &Arc<dyn Storage>,
    activity: &Activity,
    entries: &[AnalysisResultEntry],
) -> Result<Vec<Flag>> {
    let now = Utc::now().timestamp();
    let mut flags = Vec::with_capacity(entries.len());

    for entry in entries {
        // 标记行归到被评人的小组
        let Some(write) = flag_write_for_entry(
            activity.id,
            groups::resolve_group(storage.as_ref(), activity, entry.peer_id).await?,
            entry,
            now,
        ) else {
            warn!(
                "跳过带错误标记的分析条目: evaluator={}, peer={}",
                entry.evaluator_id, entry.peer_id
            );
            continue;
        };

        flags.push(storage.upsert_flag(&write).await?);
    }

    Ok(flags)
}

/// 对活动（或其中单个评分人）的互评记录执行一轮完整分析
///
/// 无互评记录时返回空集；分析服务不可用时返回 AnalysisGateway 错误，
/// 由调用方决定是吞掉还是转入后台重试。
pub async fn run_analysis(
    storage: &Arc<dyn Storage>,
    gateway: &AnalysisGateway,
    activity_id: i64,
    evaluator_id: Option<i64>,
) -> Result<Vec<Flag>> {
    let activity = storage
        .get_activity_by_id(activity_id)
        .await?
        .ok_or_else(|| PeerEvalError::not_found(format!("活动不存在: {activity_id}")))?;

    let evaluations = storage.list_evaluations(activity_id, evaluator_id).await?;
    if evaluations.is_empty() {
        info!("活动 {activity_id} 无互评记录，跳过分析");
        return Ok(Vec::new());
    }

    let records: Vec<AnalysisRequestRecord> = evaluations
        .iter()
        .map(AnalysisRequestRecord::from_evaluation)
        .collect();

    let Some(entries) = gateway.analyze(&records).await else {
        return Err(PeerEvalError::analysis_gateway(format!(
            "活动 {activity_id} 的分析调用未返回可用结果"
        )));
    };

    let flags = apply_results(storage, &activity, &entries).await?;
    info!("活动 {activity_id} 分析完成: {} 条标记", flags.len());
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::mock::MockStorage;
    use std::collections::HashMap;

    fn entry(evaluator_id: i64, peer_id: i64) -> AnalysisResultEntry {
        AnalysisResultEntry {
            evaluator_id,
            peer_id,
            comment_discrepancy_detected: false,
            mark_discrepancy_detected: false,
            misbehaviour_category_index: None,
            analysis_timestamp: 0,
            error: None,
        }
    }

    fn group(grouping_id: i64, group_id: i64) -> GroupMembership {
        GroupMembership {
            grouping_id,
            group_id,
        }
    }

    #[test]
    fn test_error_entry_is_skipped() {
        let mut e = entry(1, 2);
        e.error = Some(serde_json::json!("model failure"));
        assert!(flag_write_for_entry(10, group(0, 0), &e, 100).is_none());
    }

    #[test]
    fn test_missing_category_defaults_to_normal() {
        let write = flag_write_for_entry(10, group(1, 2), &entry(1, 2), 100).unwrap();
        let FlagWrite::Analysis(w) = write else {
            panic!("expected analysis write");
        };
        assert_eq!(w.misbehaviour_category, MISBEHAVIOUR_NORMAL);
    }

    #[test]
    fn test_analysis_timestamp_preferred_over_local_clock() {
        let mut e = entry(1, 2);
        e.analysis_timestamp = 1_700_000_000;
        let FlagWrite::Analysis(w) =
            flag_write_for_entry(10, group(0, 0), &e, 42).unwrap()
        else {
            panic!("expected analysis write");
        };
        assert_eq!(w.timestamp, 1_700_000_000);

        let FlagWrite::Analysis(w) =
            flag_write_for_entry(10, group(0, 0), &entry(1, 2), 42).unwrap()
        else {
            panic!("expected analysis write");
        };
        assert_eq!(w.timestamp, 42);
    }

    #[test]
    fn test_group_carried_into_write() {
        let FlagWrite::Analysis(w) =
            flag_write_for_entry(10, group(5, 7), &entry(3, 4), 100).unwrap()
        else {
            panic!("expected analysis write");
        };
        assert_eq!((w.grouping_id, w.group_id), (5, 7));
        assert_eq!((w.evaluator_id, w.peer_id), (3, 4));
    }

    #[tokio::test]
    async fn test_apply_results_resolves_peer_group() {
        let mock = Arc::new(MockStorage {
            groups_by_user: HashMap::from([
                (1, vec![GroupMembership {
                    grouping_id: 0,
                    group_id: 100,
                }]),
                (2, vec![GroupMembership {
                    grouping_id: 0,
                    group_id: 200,
                }]),
            ]),
            ..Default::default()
        });
        let storage: Arc<dyn Storage> = mock.clone();
        let activity = Activity {
            id: 10,
            course_id: 7,
            name: "peer eval".to_string(),
            grouping_id: None,
            linked_assignment_id: None,
            created_at: 0,
            modified_at: 0,
        };

        let flags = apply_results(&storage, &activity, &[entry(1, 2)]).await.unwrap();

        // 标记带的是被评人 2 的小组，不是评分人 1 的
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].group_id, 200);
    }
}
