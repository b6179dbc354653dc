//! 最终互评记录存储操作

use super::SeaOrmStorage;
use crate::entity::aggregate_grades::{
    Column as GradeColumn, Entity as AggregateGrades,
};
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::entity::flags::{Column as FlagColumn, Entity as Flags};
use crate::errors::{PeerEvalError, Result};
use crate::models::evaluations::{entities::Evaluation, requests::NewEvaluation};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 插入一条最终互评记录
    pub async fn insert_evaluation_impl(&self, eval: NewEvaluation) -> Result<Evaluation> {
        let model = ActiveModel {
            activity_id: Set(eval.activity_id),
            evaluator_id: Set(eval.evaluator_id),
            peer_id: Set(eval.peer_id),
            criteria1: Set(eval.criteria[0]),
            criteria2: Set(eval.criteria[1]),
            criteria3: Set(eval.criteria[2]),
            criteria4: Set(eval.criteria[3]),
            criteria5: Set(eval.criteria[4]),
            comment1: Set(eval.comment1),
            comment2: Set(eval.comment2),
            created_at: Set(eval.created_at),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("创建互评记录失败: {e}")))?;

        Ok(result.into_evaluation())
    }

    /// 列出活动下的互评记录，可选限定单个评分人
    pub async fn list_evaluations_impl(
        &self,
        activity_id: i64,
        evaluator_id: Option<i64>,
    ) -> Result<Vec<Evaluation>> {
        let mut select = Evaluations::find().filter(Column::ActivityId.eq(activity_id));

        if let Some(evaluator_id) = evaluator_id {
            select = select.filter(Column::EvaluatorId.eq(evaluator_id));
        }

        let rows = select
            .order_by_asc(Column::EvaluatorId)
            .order_by_asc(Column::PeerId)
            .all(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询互评记录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_evaluation()).collect())
    }

    /// 管理员删除某评分人的提交
    ///
    /// 级联删除该评分人的标记行与成绩行，返回是否确有互评记录被删除。
    pub async fn delete_submission_impl(
        &self,
        activity_id: i64,
        evaluator_id: i64,
    ) -> Result<bool> {
        let deleted = Evaluations::delete_many()
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::EvaluatorId.eq(evaluator_id))
            .exec(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("删除互评记录失败: {e}")))?;

        Flags::delete_many()
            .filter(FlagColumn::ActivityId.eq(activity_id))
            .filter(FlagColumn::EvaluatorId.eq(evaluator_id))
            .exec(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("删除标记失败: {e}")))?;

        AggregateGrades::delete_many()
            .filter(GradeColumn::ActivityId.eq(activity_id))
            .filter(GradeColumn::StudentId.eq(evaluator_id))
            .exec(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(deleted.rows_affected > 0)
    }
}
