//! 聚合成绩存储操作

use super::SeaOrmStorage;
use crate::entity::aggregate_grades::{ActiveModel, Column, Entity as AggregateGrades};
use crate::errors::{PeerEvalError, Result};
use crate::models::grades::{
    entities::AggregateGrade,
    requests::{NewAggregateGrade, UpdateGradeRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 替换单个学生的成绩行（delete+insert，不做增量更新）
    pub async fn replace_aggregate_grade_impl(
        &self,
        activity_id: i64,
        grade: NewAggregateGrade,
    ) -> Result<()> {
        AggregateGrades::delete_many()
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::StudentId.eq(grade.student_id))
            .exec(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("删除旧成绩失败: {e}")))?;

        let model = ActiveModel {
            activity_id: Set(activity_id),
            student_id: Set(grade.student_id),
            criteria1: Set(grade.criteria[0]),
            criteria2: Set(grade.criteria[1]),
            criteria3: Set(grade.criteria[2]),
            criteria4: Set(grade.criteria[3]),
            criteria5: Set(grade.criteria[4]),
            final_grade: Set(grade.final_grade),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("写入成绩失败: {e}")))?;

        Ok(())
    }

    /// 列出活动下全部成绩行
    pub async fn list_aggregate_grades_impl(
        &self,
        activity_id: i64,
    ) -> Result<Vec<AggregateGrade>> {
        let rows = AggregateGrades::find()
            .filter(Column::ActivityId.eq(activity_id))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_aggregate_grade()).collect())
    }

    /// 教师手工覆盖某学生的成绩
    pub async fn update_aggregate_grade_impl(
        &self,
        activity_id: i64,
        student_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<AggregateGrade>> {
        let existing = AggregateGrades::find()
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询成绩失败: {e}")))?;

        let Some(row) = existing else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(row.id),
            ..Default::default()
        };

        if let Some(v) = update.criteria[0] {
            model.criteria1 = Set(v);
        }
        if let Some(v) = update.criteria[1] {
            model.criteria2 = Set(v);
        }
        if let Some(v) = update.criteria[2] {
            model.criteria3 = Set(v);
        }
        if let Some(v) = update.criteria[3] {
            model.criteria4 = Set(v);
        }
        if let Some(v) = update.criteria[4] {
            model.criteria5 = Set(v);
        }
        if let Some(v) = update.final_grade {
            model.final_grade = Set(v);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(Some(updated.into_aggregate_grade()))
    }
}
