//! 互评草稿实体
//!
//! 每次"保存进度"整行覆盖，最终提交时按批删除。
//! criteria 列不允许 NULL，缺失值写 0，下游消费方依赖这一点。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "drafts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub activity_id: i64,
    pub evaluator_id: i64,
    pub peer_id: i64,
    pub criteria1: i32,
    pub criteria2: i32,
    pub criteria3: i32,
    pub criteria4: i32,
    pub criteria5: i32,
    #[sea_orm(column_type = "Text")]
    pub comment1: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment2: Option<String>,
    pub created_at: i64,
    pub modified_at: i64,
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
    pub fn into_draft(self) -> crate::models::evaluations::entities::Draft {
        crate::models::evaluations::entities::Draft {
            id: self.id,
            activity_id: self.activity_id,
            evaluator_id: self.evaluator_id,
            peer_id: self.peer_id,
            criteria: [
                self.criteria1,
                self.criteria2,
                self.criteria3,
                self.criteria4,
                self.criteria5,
            ],
            comment1: self.comment1,
            comment2: self.comment2,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}
