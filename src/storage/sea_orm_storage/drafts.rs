//! 草稿存储操作

use super::SeaOrmStorage;
use crate::entity::drafts::{ActiveModel, Column, Entity as Drafts};
use crate::errors::{PeerEvalError, Result};
use crate::models::evaluations::{entities::Draft, requests::NewDraft};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 按 (activity, evaluator, peer) 整行覆盖草稿
    pub async fn upsert_draft_impl(&self, draft: NewDraft) -> Result<()> {
        let existing = Drafts::find()
            .filter(Column::ActivityId.eq(draft.activity_id))
            .filter(Column::EvaluatorId.eq(draft.evaluator_id))
            .filter(Column::PeerId.eq(draft.peer_id))
            .one(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询草稿失败: {e}")))?;

        let mut model = ActiveModel {
            activity_id: Set(draft.activity_id),
            evaluator_id: Set(draft.evaluator_id),
            peer_id: Set(draft.peer_id),
            criteria1: Set(draft.criteria[0]),
            criteria2: Set(draft.criteria[1]),
            criteria3: Set(draft.criteria[2]),
            criteria4: Set(draft.criteria[3]),
            criteria5: Set(draft.criteria[4]),
            comment1: Set(draft.comment1),
            comment2: Set(draft.comment2),
            modified_at: Set(draft.modified_at),
            ..Default::default()
        };

        match existing {
            Some(row) => {
                model.id = Set(row.id);
                model.created_at = Set(row.created_at);
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| PeerEvalError::database_operation(format!("更新草稿失败: {e}")))?;
            }
            None => {
                model.created_at = Set(draft.modified_at);
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| PeerEvalError::database_operation(format!("创建草稿失败: {e}")))?;
            }
        }

        Ok(())
    }

    /// 列出评分人在某活动下的全部草稿
    pub async fn list_drafts_impl(
        &self,
        activity_id: i64,
        evaluator_id: i64,
    ) -> Result<Vec<Draft>> {
        let rows = Drafts::find()
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::EvaluatorId.eq(evaluator_id))
            .order_by_asc(Column::PeerId)
            .all(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询草稿列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_draft()).collect())
    }

    /// 最终提交时按批删除草稿
    pub async fn delete_drafts_for_peers_impl(
        &self,
        activity_id: i64,
        evaluator_id: i64,
        peer_ids: &[i64],
    ) -> Result<u64> {
        if peer_ids.is_empty() {
            return Ok(0);
        }

        let result = Drafts::delete_many()
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::EvaluatorId.eq(evaluator_id))
            .filter(Column::PeerId.is_in(peer_ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("删除草稿失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
