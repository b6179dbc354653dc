//! 最终互评记录实体
//!
//! 每个 (activity_id, evaluator_id, peer_id) 至多一行，提交后不可变。
//! comment2 仅在自评行（peer_id == evaluator_id）有意义。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub activity_id: i64,
    pub evaluator_id: i64,
    pub peer_id: i64,
    #[sea_orm(nullable)]
    pub criteria1: Option<i32>,
    #[sea_orm(nullable)]
    pub criteria2: Option<i32>,
    #[sea_orm(nullable)]
    pub criteria3: Option<i32>,
    #[sea_orm(nullable)]
    pub criteria4: Option<i32>,
    #[sea_orm(nullable)]
    pub criteria5: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub comment1: String,
    #[sea_orm(column_type = "Text")]
    pub comment2: String,
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
    pub fn into_evaluation(self) -> crate::models::evaluations::entities::Evaluation {
        crate::models::evaluations::entities::Evaluation {
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
        }
    }
}
