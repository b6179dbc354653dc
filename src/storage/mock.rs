//! 测试用内存存储
//!
//! 只填充用例关心的数据，未配置的操作返回空结果。
//! 写操作记录到 Mutex 保护的向量里供断言检查。

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::Storage;
use crate::errors::{PeerEvalError, Result};
use crate::models::{
    activities::entities::{Activity, GroupMembership},
    criteria::entities::{BankQuestion, CriterionSlot},
    evaluations::{
        entities::{Draft, Evaluation},
        requests::{NewDraft, NewEvaluation},
    },
    flags::{
        entities::Flag,
        merge::{FlagWrite, apply_flag_write},
    },
    grades::{
        entities::AggregateGrade,
        requests::{NewAggregateGrade, UpdateGradeRequest},
    },
};

#[derive(Default)]
pub struct MockStorage {
    pub activity: Option<Activity>,
    // user_id -> 已按 (grouping_id, group_id) 排序的小组归属
    pub groups_by_user: HashMap<i64, Vec<GroupMembership>>,
    pub assignment_grouping: Option<i64>,
    pub fail_draft_delete: bool,
    pub evaluations: Mutex<Vec<Evaluation>>,
    pub flags: Mutex<Vec<Flag>>,
    pub deleted_draft_batches: Mutex<Vec<Vec<i64>>>,
}

#[async_trait]
impl Storage for MockStorage {
    async fn get_activity_by_id(&self, _activity_id: i64) -> Result<Option<Activity>> {
        Ok(self.activity.clone())
    }

    async fn upsert_draft(&self, _draft: NewDraft) -> Result<()> {
        Ok(())
    }

    async fn list_drafts(&self, _activity_id: i64, _evaluator_id: i64) -> Result<Vec<Draft>> {
        Ok(Vec::new())
    }

    async fn delete_drafts_for_peers(
        &self,
        _activity_id: i64,
        _evaluator_id: i64,
        peer_ids: &[i64],
    ) -> Result<u64> {
        if self.fail_draft_delete {
            return Err(PeerEvalError::database_operation("草稿删除失败"));
        }
        self.deleted_draft_batches
            .lock()
            .unwrap()
            .push(peer_ids.to_vec());
        Ok(peer_ids.len() as u64)
    }

    async fn get_criteria(&self, _activity_id: i64) -> Result<Vec<CriterionSlot>> {
        Ok(Vec::new())
    }

    async fn save_criteria(&self, _activity_id: i64, _slots: &[CriterionSlot]) -> Result<()> {
        Ok(())
    }

    async fn list_question_bank(&self, _course_id: i64) -> Result<Vec<BankQuestion>> {
        Ok(Vec::new())
    }

    async fn insert_evaluation(&self, eval: NewEvaluation) -> Result<Evaluation> {
        let mut evaluations = self.evaluations.lock().unwrap();
        let stored = Evaluation {
            id: evaluations.len() as i64 + 1,
            activity_id: eval.activity_id,
            evaluator_id: eval.evaluator_id,
            peer_id: eval.peer_id,
            criteria: eval.criteria,
            comment1: eval.comment1,
            comment2: eval.comment2,
            created_at: eval.created_at,
        };
        evaluations.push(stored.clone());
        Ok(stored)
    }

    async fn list_evaluations(
        &self,
        activity_id: i64,
        evaluator_id: Option<i64>,
    ) -> Result<Vec<Evaluation>> {
        Ok(self
            .evaluations
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                e.activity_id == activity_id
                    && evaluator_id.is_none_or(|id| e.evaluator_id == id)
            })
            .cloned()
            .collect())
    }

    async fn delete_submission(&self, _activity_id: i64, _evaluator_id: i64) -> Result<bool> {
        Ok(false)
    }

    async fn replace_aggregate_grade(
        &self,
        _activity_id: i64,
        _grade: NewAggregateGrade,
    ) -> Result<()> {
        Ok(())
    }

    async fn list_aggregate_grades(&self, _activity_id: i64) -> Result<Vec<AggregateGrade>> {
        Ok(Vec::new())
    }

    async fn update_aggregate_grade(
        &self,
        _activity_id: i64,
        _student_id: i64,
        _update: UpdateGradeRequest,
    ) -> Result<Option<AggregateGrade>> {
        Ok(None)
    }

    async fn upsert_flag(&self, write: &FlagWrite) -> Result<Flag> {
        let mut flags = self.flags.lock().unwrap();
        let key = write.key();
        let position = flags
            .iter()
            .position(|f| (f.activity_id, f.evaluator_id, f.peer_id) == key);

        let mut merged = apply_flag_write(position.map(|i| flags[i].clone()), write);
        match position {
            Some(i) => flags[i] = merged.clone(),
            None => {
                merged.id = flags.len() as i64 + 1;
                flags.push(merged.clone());
            }
        }
        Ok(merged)
    }

    async fn list_flags(&self, activity_id: i64) -> Result<Vec<Flag>> {
        Ok(self
            .flags
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.activity_id == activity_id)
            .cloned()
            .collect())
    }

    async fn list_enrolled_user_ids(&self, _course_id: i64) -> Result<Vec<i64>> {
        Ok(Vec::new())
    }

    async fn get_user_groups(
        &self,
        _course_id: i64,
        user_id: i64,
    ) -> Result<Vec<GroupMembership>> {
        Ok(self.groups_by_user.get(&user_id).cloned().unwrap_or_default())
    }

    async fn get_assignment_grouping(&self, _assignment_id: i64) -> Result<Option<i64>> {
        Ok(self.assignment_grouping)
    }

    async fn get_display_names(&self, _user_ids: &[i64]) -> Result<HashMap<i64, String>> {
        Ok(HashMap::new())
    }
}
