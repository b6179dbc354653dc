//! 评分条目定义存储操作

use super::SeaOrmStorage;
use crate::entity::criteria::{ActiveModel, Column as CriterionColumn, Entity as Criteria};
use crate::entity::question_bank::{Column as BankColumn, Entity as QuestionBank};
use crate::errors::{PeerEvalError, Result};
use crate::models::criteria::entities::{BankQuestion, CriterionSlot};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 活动的评分条目定义行，按槽位升序
    pub async fn get_criteria_impl(&self, activity_id: i64) -> Result<Vec<CriterionSlot>> {
        let rows = Criteria::find()
            .filter(CriterionColumn::ActivityId.eq(activity_id))
            .order_by_asc(CriterionColumn::Slot)
            .all(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询评分条目失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_criterion_slot()).collect())
    }

    /// 整组覆盖活动的评分条目定义，按 (activity, slot) 逐槽位 upsert
    pub async fn save_criteria_impl(
        &self,
        activity_id: i64,
        slots: &[CriterionSlot],
    ) -> Result<()> {
        for slot in slots {
            let existing = Criteria::find()
                .filter(CriterionColumn::ActivityId.eq(activity_id))
                .filter(CriterionColumn::Slot.eq(slot.slot))
                .one(&self.db)
                .await
                .map_err(|e| {
                    PeerEvalError::database_operation(format!("查询评分条目失败: {e}"))
                })?;

            let mut model = ActiveModel {
                activity_id: Set(activity_id),
                slot: Set(slot.slot),
                question_text: Set(slot.question_text.clone()),
                question_bank_id: Set(slot.question_bank_id),
                ..Default::default()
            };

            match existing {
                Some(row) => {
                    model.id = Set(row.id);
                    model.update(&self.db).await.map_err(|e| {
                        PeerEvalError::database_operation(format!("更新评分条目失败: {e}"))
                    })?;
                }
                None => {
                    model.insert(&self.db).await.map_err(|e| {
                        PeerEvalError::database_operation(format!("创建评分条目失败: {e}"))
                    })?;
                }
            }
        }

        Ok(())
    }

    /// 课程题库列表
    pub async fn list_question_bank_impl(&self, course_id: i64) -> Result<Vec<BankQuestion>> {
        let rows = QuestionBank::find()
            .filter(BankColumn::CourseId.eq(course_id))
            .order_by_asc(BankColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询题库失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_bank_question()).collect())
    }
}
