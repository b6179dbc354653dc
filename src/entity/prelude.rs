//! 预导入模块，方便使用

pub use super::activities::{
    ActiveModel as ActivityActiveModel, Entity as Activities, Model as ActivityModel,
};
pub use super::aggregate_grades::{
    ActiveModel as AggregateGradeActiveModel, Entity as AggregateGrades,
    Model as AggregateGradeModel,
};
pub use super::assignments::{Entity as Assignments, Model as AssignmentModel};
pub use super::courses::{Entity as Courses, Model as CourseModel};
pub use super::criteria::{
    ActiveModel as CriterionActiveModel, Entity as Criteria, Model as CriterionModel,
};
pub use super::drafts::{ActiveModel as DraftActiveModel, Entity as Drafts, Model as DraftModel};
pub use super::enrollments::{Entity as Enrollments, Model as EnrollmentModel};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::flags::{ActiveModel as FlagActiveModel, Entity as Flags, Model as FlagModel};
pub use super::group_members::{Entity as GroupMembers, Model as GroupMemberModel};
pub use super::groups::{Entity as Groups, Model as GroupModel};
pub use super::question_bank::{Entity as QuestionBank, Model as QuestionBankModel};
pub use super::users::{Entity as Users, Model as UserModel};
