//! 聚合成绩实体
//!
//! 派生数据：每个 (activity_id, student_id) 恰好一行，
//! 每次聚合运行以 delete+insert 方式整体重建。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "aggregate_grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub activity_id: i64,
    pub student_id: i64,
    pub criteria1: f64,
    pub criteria2: f64,
    pub criteria3: f64,
    pub criteria4: f64,
    pub criteria5: f64,
    pub final_grade: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activities::Entity",
        from = "Column::ActivityId",
        to = "super::activities::Column::Id"
    )]
    Activity,
}

impl Related<super::activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_aggregate_grade(self) -> crate::models::grades::entities::AggregateGrade {
        crate::models::grades::entities::AggregateGrade {
            id: self.id,
            activity_id: self.activity_id,
            student_id: self.student_id,
            criteria: [
                self.criteria1,
                self.criteria2,
                self.criteria3,
                self.criteria4,
                self.criteria5,
            ],
            final_grade: self.final_grade,
        }
    }
}
