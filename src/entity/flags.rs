//! 异常标记实体
//!
//! 每个 (activity_id, evaluator_id, peer_id) 至多一行。
//! 同一行由两个独立写入方通过 upsert 维护：提交终结器只拥有
//! quick_submission_discrepancy，AI 分析只拥有 comment/mark discrepancy
//! 与 misbehaviour_category。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "flags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub activity_id: i64,
    pub evaluator_id: i64,
    pub peer_id: i64,
    pub grouping_id: i64,
    pub group_id: i64,
    pub comment_discrepancy: bool,
    pub mark_discrepancy: bool,
    pub quick_submission_discrepancy: bool,
    pub misbehaviour_category: i32,
    pub created_at: i64,
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
    pub fn into_flag(self) -> crate::models::flags::entities::Flag {
        crate::models::flags::entities::Flag {
            id: self.id,
            activity_id: self.activity_id,
            evaluator_id: self.evaluator_id,
            peer_id: self.peer_id,
            grouping_id: self.grouping_id,
            group_id: self.group_id,
            comment_discrepancy: self.comment_discrepancy,
            mark_discrepancy: self.mark_discrepancy,
            quick_submission_discrepancy: self.quick_submission_discrepancy,
            misbehaviour_category: self.misbehaviour_category,
            created_at: self.created_at,
        }
    }
}
