//! 异常标记存储操作
//!
//! upsert 的字段归属语义由 models::flags::merge 统一给出，
//! 存储层只负责取现有行、应用合并、写回整行。

use super::SeaOrmStorage;
use crate::entity::flags::{ActiveModel, Column, Entity as Flags};
use crate::errors::{PeerEvalError, Result};
use crate::models::flags::{
    entities::Flag,
    merge::{FlagWrite, apply_flag_write},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 按字段归属合并写入标记行
    pub async fn upsert_flag_impl(&self, write: &FlagWrite) -> Result<Flag> {
        let (activity_id, evaluator_id, peer_id) = write.key();

        let existing = Flags::find()
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::EvaluatorId.eq(evaluator_id))
            .filter(Column::PeerId.eq(peer_id))
            .one(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询标记失败: {e}")))?;

        let is_update = existing.is_some();
        let merged = apply_flag_write(existing.map(|m| m.into_flag()), write);

        let mut model = ActiveModel {
            activity_id: Set(merged.activity_id),
            evaluator_id: Set(merged.evaluator_id),
            peer_id: Set(merged.peer_id),
            grouping_id: Set(merged.grouping_id),
            group_id: Set(merged.group_id),
            comment_discrepancy: Set(merged.comment_discrepancy),
            mark_discrepancy: Set(merged.mark_discrepancy),
            quick_submission_discrepancy: Set(merged.quick_submission_discrepancy),
            misbehaviour_category: Set(merged.misbehaviour_category),
            created_at: Set(merged.created_at),
            ..Default::default()
        };

        let stored = if is_update {
            model.id = Set(merged.id);
            model
                .update(&self.db)
                .await
                .map_err(|e| PeerEvalError::database_operation(format!("更新标记失败: {e}")))?
        } else {
            model
                .insert(&self.db)
                .await
                .map_err(|e| PeerEvalError::database_operation(format!("创建标记失败: {e}")))?
        };

        Ok(stored.into_flag())
    }

    /// 列出活动下全部标记行
    pub async fn list_flags_impl(&self, activity_id: i64) -> Result<Vec<Flag>> {
        let rows = Flags::find()
            .filter(Column::ActivityId.eq(activity_id))
            .order_by_asc(Column::EvaluatorId)
            .order_by_asc(Column::PeerId)
            .all(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询标记列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_flag()).collect())
    }
}
