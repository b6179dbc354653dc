//! 评分条目定义实体
//!
//! 每个活动至多 5 行，(activity_id, slot) 唯一。
//! question_text 与 question_bank_id 互斥，语义见 models::criteria。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "criteria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub activity_id: i64,
    pub slot: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub question_text: Option<String>,
    pub question_bank_id: i64,
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
    pub fn into_criterion_slot(self) -> crate::models::criteria::entities::CriterionSlot {
        crate::models::criteria::entities::CriterionSlot {
            slot: self.slot,
            question_text: self.question_text,
            question_bank_id: self.question_bank_id,
        }
    }
}
