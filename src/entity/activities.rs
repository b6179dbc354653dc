//! 互评活动实体
//!
//! grouping_id 与 linked_assignment_id 互斥：活动要么直接绑定分组方案，
//! 要么链接到外部作业并沿用其分组方案。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    #[sea_orm(nullable)]
    pub grouping_id: Option<i64>,
    #[sea_orm(nullable)]
    pub linked_assignment_id: Option<i64>,
    pub created_at: i64,
    pub modified_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::drafts::Entity")]
    Drafts,
    #[sea_orm(has_many = "super::aggregate_grades::Entity")]
    AggregateGrades,
    #[sea_orm(has_many = "super::flags::Entity")]
    Flags,
    #[sea_orm(has_many = "super::criteria::Entity")]
    Criteria,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl Related<super::drafts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drafts.def()
    }
}

impl Related<super::aggregate_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AggregateGrades.def()
    }
}

impl Related<super::flags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flags.def()
    }
}

impl Related<super::criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Criteria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_activity(self) -> crate::models::activities::entities::Activity {
        crate::models::activities::entities::Activity {
            id: self.id,
            course_id: self.course_id,
            name: self.name,
            grouping_id: self.grouping_id,
            linked_assignment_id: self.linked_assignment_id,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}
