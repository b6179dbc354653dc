//! CSV 报表导出
//!
//! 两张表都带人类可读的显示名列，标记表额外把不当行为类别
//! 翻译成标签文本，方便教师直接在表格软件里筛查。

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::error;

use super::ExportService;
use crate::errors::{PeerEvalError, Result};
use crate::models::evaluations::entities::Evaluation;
use crate::models::export::requests::{ExportQuery, ExportTable};
use crate::models::flags::entities::{Flag, misbehaviour_label};
use crate::models::{ApiResponse, ErrorCode};

fn display_name(names: &HashMap<i64, String>, user_id: i64) -> String {
    names
        .get(&user_id)
        .cloned()
        .unwrap_or_else(|| user_id.to_string())
}

/// 互评记录表（按 (evaluator, peer) 连上对应的标记行）
pub fn build_evaluations_csv(
    evaluations: &[Evaluation],
    flags: &[Flag],
    names: &HashMap<i64, String>,
) -> Result<Vec<u8>> {
    let flag_by_pair: HashMap<(i64, i64), &Flag> = flags
        .iter()
        .map(|f| ((f.evaluator_id, f.peer_id), f))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "evaluator",
        "peer",
        "criteria1",
        "criteria2",
        "criteria3",
        "criteria4",
        "criteria5",
        "comment1",
        "comment2",
        "comment_discrepancy",
        "mark_discrepancy",
        "quick_submission_discrepancy",
        "misbehaviour",
        "created_at",
    ])?;

    for eval in evaluations {
        let criteria: Vec<String> = eval
            .criteria
            .iter()
            .map(|c| c.map(|v| v.to_string()).unwrap_or_default())
            .collect();
        let flag = flag_by_pair.get(&(eval.evaluator_id, eval.peer_id));
        writer.write_record([
            display_name(names, eval.evaluator_id),
            display_name(names, eval.peer_id),
            criteria[0].clone(),
            criteria[1].clone(),
            criteria[2].clone(),
            criteria[3].clone(),
            criteria[4].clone(),
            eval.comment1.clone(),
            eval.comment2.clone(),
            flag.map(|f| f.comment_discrepancy.to_string())
                .unwrap_or_default(),
            flag.map(|f| f.mark_discrepancy.to_string())
                .unwrap_or_default(),
            flag.map(|f| f.quick_submission_discrepancy.to_string())
                .unwrap_or_default(),
            flag.map(|f| misbehaviour_label(f.misbehaviour_category).to_string())
                .unwrap_or_default(),
            eval.created_at.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| PeerEvalError::csv_export(format!("CSV 缓冲区写入失败: {e}")))
}

/// 异常标记表
pub fn build_flags_csv(flags: &[Flag], names: &HashMap<i64, String>) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "evaluator",
        "peer",
        "grouping_id",
        "group_id",
        "comment_discrepancy",
        "mark_discrepancy",
        "quick_submission_discrepancy",
        "misbehaviour",
        "created_at",
    ])?;

    for flag in flags {
        writer.write_record([
            display_name(names, flag.evaluator_id),
            display_name(names, flag.peer_id),
            flag.grouping_id.to_string(),
            flag.group_id.to_string(),
            flag.comment_discrepancy.to_string(),
            flag.mark_discrepancy.to_string(),
            flag.quick_submission_discrepancy.to_string(),
            misbehaviour_label(flag.misbehaviour_category).to_string(),
            flag.created_at.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| PeerEvalError::csv_export(format!("CSV 缓冲区写入失败: {e}")))
}

pub async fn export(
    service: &ExportService,
    request: &HttpRequest,
    activity_id: i64,
    query: ExportQuery,
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

    let (table_name, buffer) = match query.table {
        ExportTable::Evaluations => {
            let evaluations = match storage.list_evaluations(activity_id, None).await {
                Ok(rows) => rows,
                Err(e) => {
                    error!("查询互评记录失败: {e}");
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while fetching evaluations",
                        ),
                    ));
                }
            };

            let flags = match storage.list_flags(activity_id).await {
                Ok(rows) => rows,
                Err(e) => {
                    error!("查询标记列表失败: {e}");
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while fetching flags",
                        ),
                    ));
                }
            };

            let mut user_ids: Vec<i64> = evaluations
                .iter()
                .flat_map(|e| [e.evaluator_id, e.peer_id])
                .collect();
            user_ids.sort_unstable();
            user_ids.dedup();

            let names = match storage.get_display_names(&user_ids).await {
                Ok(names) => names,
                Err(e) => {
                    error!("查询显示名失败: {e}");
                    HashMap::new()
                }
            };

            (
                "evaluations",
                build_evaluations_csv(&evaluations, &flags, &names),
            )
        }
        ExportTable::Flags => {
            let flags = match storage.list_flags(activity_id).await {
                Ok(rows) => rows,
                Err(e) => {
                    error!("查询标记列表失败: {e}");
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while fetching flags",
                        ),
                    ));
                }
            };

            let mut user_ids: Vec<i64> = flags
                .iter()
                .flat_map(|f| [f.evaluator_id, f.peer_id])
                .collect();
            user_ids.sort_unstable();
            user_ids.dedup();

            let names = match storage.get_display_names(&user_ids).await {
                Ok(names) => names,
                Err(e) => {
                    error!("查询显示名失败: {e}");
                    HashMap::new()
                }
            };

            ("flags", build_flags_csv(&flags, &names))
        }
    };

    match buffer {
        Ok(bytes) => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
            let filename = format!("activity_{activity_id}_{table_name}_{timestamp}.csv");
            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(bytes))
        }
        Err(e) => {
            error!("生成 CSV 失败: {e}");
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error while generating CSV",
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> HashMap<i64, String> {
        HashMap::from([(1, "Alice".to_string()), (2, "Bob".to_string())])
    }

    #[test]
    fn test_evaluations_csv_joins_flags() {
        let evals = [Evaluation {
            id: 1,
            activity_id: 10,
            evaluator_id: 1,
            peer_id: 2,
            criteria: [Some(4), None, Some(3), Some(5), None],
            comment1: "solid work".to_string(),
            comment2: String::new(),
            created_at: 1_700_000_000,
        }];
        let flags = [Flag {
            id: 1,
            activity_id: 10,
            evaluator_id: 1,
            peer_id: 2,
            grouping_id: 0,
            group_id: 0,
            comment_discrepancy: true,
            mark_discrepancy: false,
            quick_submission_discrepancy: false,
            misbehaviour_category: 1,
            created_at: 1_700_000_000,
        }];
        let bytes = build_evaluations_csv(&evals, &flags, &names()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("evaluator,peer,criteria1"));
        // 空评分留空字段，标记列来自 (evaluator, peer) 连接
        assert_eq!(
            lines.next().unwrap(),
            "Alice,Bob,4,,3,5,,solid work,,true,false,false,-,1700000000"
        );
    }

    #[test]
    fn test_evaluations_csv_without_matching_flag() {
        let evals = [Evaluation {
            id: 1,
            activity_id: 10,
            evaluator_id: 1,
            peer_id: 2,
            criteria: [Some(4), Some(4), Some(4), Some(4), Some(4)],
            comment1: String::new(),
            comment2: String::new(),
            created_at: 100,
        }];
        let bytes = build_evaluations_csv(&evals, &[], &names()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        // 无标记行时标记列全部留空
        assert_eq!(text.lines().nth(1).unwrap(), "Alice,Bob,4,4,4,4,4,,,,,,,100");
    }

    #[test]
    fn test_flags_csv_uses_labels_and_fallback_names() {
        let flags = [Flag {
            id: 1,
            activity_id: 10,
            evaluator_id: 1,
            peer_id: 99,
            grouping_id: 5,
            group_id: 7,
            comment_discrepancy: true,
            mark_discrepancy: false,
            quick_submission_discrepancy: true,
            misbehaviour_category: 6,
            created_at: 1_700_000_000,
        }];
        let bytes = build_flags_csv(&flags, &names()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let row = text.lines().nth(1).unwrap();
        // 未知用户退回数字 ID，类别翻译成标签
        assert!(row.starts_with("Alice,99,5,7,true,false,true,"));
        assert!(row.contains("Dishonest or plagiarism behaviour"));
    }

    #[test]
    fn test_empty_tables_still_have_headers() {
        let bytes = build_flags_csv(&[], &HashMap::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
