//! 标记行合并逻辑
//!
//! 同一标记行由两个独立写入方在不同时间点 upsert，合并必须保留
//! 不属于本次写入方的字段。字段归属表：
//!
//! | 字段                         | 提交终结器 | AI 分析 |
//! |------------------------------|-----------|---------|
//! | grouping_id / group_id       | 仅插入    | 插入+更新 |
//! | quick_submission_discrepancy | 插入+更新 | 从不     |
//! | comment_discrepancy          | 仅插入(默认) | 插入+更新 |
//! | mark_discrepancy             | 仅插入(默认) | 插入+更新 |
//! | misbehaviour_category        | 仅插入(默认) | 插入+更新 |
//! | created_at                   | 插入+更新 | 插入+更新 |
//!
//! 插入时写入方未持有的字段取默认值（discrepancy 为 false，
//! misbehaviour_category 为 1）。

use super::entities::{Flag, MISBEHAVIOUR_NORMAL};

/// 提交终结器的标记写入（本地信号）
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionFlagWrite {
    pub activity_id: i64,
    pub evaluator_id: i64,
    pub peer_id: i64,
    pub grouping_id: i64,
    pub group_id: i64,
    pub quick_submission_discrepancy: bool,
    pub timestamp: i64,
}

/// AI 分析的标记写入（外部信号）
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisFlagWrite {
    pub activity_id: i64,
    pub evaluator_id: i64,
    pub peer_id: i64,
    pub grouping_id: i64,
    pub group_id: i64,
    pub comment_discrepancy: bool,
    pub mark_discrepancy: bool,
    pub misbehaviour_category: i32,
    // 取自分析结果自带的时间戳，不是本地时钟
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlagWrite {
    Submission(SubmissionFlagWrite),
    Analysis(AnalysisFlagWrite),
}

impl FlagWrite {
    /// 逻辑行键 (activity_id, evaluator_id, peer_id)
    pub fn key(&self) -> (i64, i64, i64) {
        match self {
            FlagWrite::Submission(w) => (w.activity_id, w.evaluator_id, w.peer_id),
            FlagWrite::Analysis(w) => (w.activity_id, w.evaluator_id, w.peer_id),
        }
    }
}

/// 将一次写入合并到（可能存在的）现有标记行上，返回整行的目标状态
///
/// 不存在现有行时 id 为 0，由存储层插入后回填。
pub fn apply_flag_write(existing: Option<Flag>, write: &FlagWrite) -> Flag {
    match (existing, write) {
        (None, FlagWrite::Submission(w)) => Flag {
            id: 0,
            activity_id: w.activity_id,
            evaluator_id: w.evaluator_id,
            peer_id: w.peer_id,
            grouping_id: w.grouping_id,
            group_id: w.group_id,
            comment_discrepancy: false,
            mark_discrepancy: false,
            quick_submission_discrepancy: w.quick_submission_discrepancy,
            misbehaviour_category: MISBEHAVIOUR_NORMAL,
            created_at: w.timestamp,
        },
        (Some(mut flag), FlagWrite::Submission(w)) => {
            // 更新路径只触碰本写入方拥有的字段
            flag.quick_submission_discrepancy = w.quick_submission_discrepancy;
            flag.created_at = w.timestamp;
            flag
        }
        (None, FlagWrite::Analysis(w)) => Flag {
            id: 0,
            activity_id: w.activity_id,
            evaluator_id: w.evaluator_id,
            peer_id: w.peer_id,
            grouping_id: w.grouping_id,
            group_id: w.group_id,
            comment_discrepancy: w.comment_discrepancy,
            mark_discrepancy: w.mark_discrepancy,
            quick_submission_discrepancy: false,
            misbehaviour_category: w.misbehaviour_category,
            created_at: w.timestamp,
        },
        (Some(mut flag), FlagWrite::Analysis(w)) => {
            flag.grouping_id = w.grouping_id;
            flag.group_id = w.group_id;
            flag.comment_discrepancy = w.comment_discrepancy;
            flag.mark_discrepancy = w.mark_discrepancy;
            flag.misbehaviour_category = w.misbehaviour_category;
            flag.created_at = w.timestamp;
            flag
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission_write(quick: bool, ts: i64) -> FlagWrite {
        FlagWrite::Submission(SubmissionFlagWrite {
            activity_id: 10,
            evaluator_id: 1,
            peer_id: 2,
            grouping_id: 5,
            group_id: 7,
            quick_submission_discrepancy: quick,
            timestamp: ts,
        })
    }

    fn analysis_write(comment: bool, mark: bool, category: i32, ts: i64) -> FlagWrite {
        FlagWrite::Analysis(AnalysisFlagWrite {
            activity_id: 10,
            evaluator_id: 1,
            peer_id: 2,
            grouping_id: 5,
            group_id: 7,
            comment_discrepancy: comment,
            mark_discrepancy: mark,
            misbehaviour_category: category,
            timestamp: ts,
        })
    }

    #[test]
    fn test_submission_insert_uses_defaults_for_analysis_fields() {
        let flag = apply_flag_write(None, &submission_write(true, 100));
        assert!(flag.quick_submission_discrepancy);
        assert!(!flag.comment_discrepancy);
        assert!(!flag.mark_discrepancy);
        assert_eq!(flag.misbehaviour_category, MISBEHAVIOUR_NORMAL);
        assert_eq!(flag.created_at, 100);
        assert_eq!((flag.grouping_id, flag.group_id), (5, 7));
    }

    #[test]
    fn test_submission_update_preserves_analysis_fields() {
        let existing = apply_flag_write(None, &analysis_write(true, true, 4, 100));
        let merged = apply_flag_write(Some(existing), &submission_write(true, 200));
        // 分析拥有的字段原样保留
        assert!(merged.comment_discrepancy);
        assert!(merged.mark_discrepancy);
        assert_eq!(merged.misbehaviour_category, 4);
        // 提交拥有的字段被更新
        assert!(merged.quick_submission_discrepancy);
        assert_eq!(merged.created_at, 200);
    }

    #[test]
    fn test_analysis_update_preserves_quick_submission() {
        let existing = apply_flag_write(None, &submission_write(true, 100));
        let merged = apply_flag_write(Some(existing), &analysis_write(true, false, 3, 300));
        // 提交拥有的字段原样保留
        assert!(merged.quick_submission_discrepancy);
        // 分析拥有的字段被更新
        assert!(merged.comment_discrepancy);
        assert!(!merged.mark_discrepancy);
        assert_eq!(merged.misbehaviour_category, 3);
        assert_eq!(merged.created_at, 300);
    }

    #[test]
    fn test_analysis_insert_defaults_quick_to_false() {
        let flag = apply_flag_write(None, &analysis_write(false, true, 2, 50));
        assert!(!flag.quick_submission_discrepancy);
        assert!(flag.mark_discrepancy);
    }

    #[test]
    fn test_analysis_rerun_is_idempotent() {
        let write = analysis_write(true, false, 5, 400);
        let first = apply_flag_write(None, &write);
        let second = apply_flag_write(Some(first.clone()), &write);
        assert_eq!(first, second);
    }

    #[test]
    fn test_submission_update_does_not_touch_group() {
        let mut existing = apply_flag_write(None, &analysis_write(false, false, 1, 100));
        existing.grouping_id = 9;
        existing.group_id = 11;
        let merged = apply_flag_write(Some(existing), &submission_write(false, 200));
        assert_eq!((merged.grouping_id, merged.group_id), (9, 11));
    }
}
