//! 题库实体
//!
//! 课程级预定义题目，由外部协作方维护，本服务只读。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "question_bank")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    pub is_open_question: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_bank_question(self) -> crate::models::criteria::entities::BankQuestion {
        crate::models::criteria::entities::BankQuestion {
            id: self.id,
            course_id: self.course_id,
            question_text: self.question_text,
            is_open_question: self.is_open_question,
        }
    }
}
