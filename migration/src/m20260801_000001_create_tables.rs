use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建选课表（评分聚合依赖的花名册）
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course_user")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .col(Enrollments::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建小组表（grouping_id 为空表示不属于任何分组方案）
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Groups::GroupingId).big_integer().null())
                    .col(ColumnDef::new(Groups::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Groups::Table, Groups::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组成员表
        manager
            .create_table(
                Table::create()
                    .table(GroupMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GroupMembers::GroupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupMembers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GroupMembers::Table, GroupMembers::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题库表（课程级预定义题目，外部协作方维护）
        manager
            .create_table(
                Table::create()
                    .table(QuestionBank::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionBank::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionBank::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionBank::QuestionText)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionBank::IsOpenQuestion)
                            .boolean()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuestionBank::Table, QuestionBank::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建外部作业表（互评活动可以链接到作业并沿用其分组方案）
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::GroupingId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Assignments::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建互评活动表
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Activities::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Activities::Name).string().not_null())
                    .col(ColumnDef::new(Activities::GroupingId).big_integer().null())
                    .col(
                        ColumnDef::new(Activities::LinkedAssignmentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Activities::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Activities::ModifiedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Activities::Table, Activities::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分条目定义表（每活动至多 5 个槽位，文本与题库 ID 互斥）
        manager
            .create_table(
                Table::create()
                    .table(Criteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Criteria::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Criteria::ActivityId).big_integer().not_null())
                    .col(ColumnDef::new(Criteria::Slot).integer().not_null())
                    .col(ColumnDef::new(Criteria::QuestionText).text().null())
                    .col(
                        ColumnDef::new(Criteria::QuestionBankId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Criteria::Table, Criteria::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_criteria_activity_slot")
                    .table(Criteria::Table)
                    .col(Criteria::ActivityId)
                    .col(Criteria::Slot)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建最终互评记录表（提交后不可变）
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ActivityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::PeerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::Criteria1).integer().null())
                    .col(ColumnDef::new(Evaluations::Criteria2).integer().null())
                    .col(ColumnDef::new(Evaluations::Criteria3).integer().null())
                    .col(ColumnDef::new(Evaluations::Criteria4).integer().null())
                    .col(ColumnDef::new(Evaluations::Criteria5).integer().null())
                    .col(ColumnDef::new(Evaluations::Comment1).text().not_null())
                    .col(ColumnDef::new(Evaluations::Comment2).text().not_null())
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_triple")
                    .table(Evaluations::Table)
                    .col(Evaluations::ActivityId)
                    .col(Evaluations::EvaluatorId)
                    .col(Evaluations::PeerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建草稿表（保存进度，提交时删除）
        manager
            .create_table(
                Table::create()
                    .table(Drafts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drafts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Drafts::ActivityId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Drafts::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Drafts::PeerId).big_integer().not_null())
                    .col(ColumnDef::new(Drafts::Criteria1).integer().not_null())
                    .col(ColumnDef::new(Drafts::Criteria2).integer().not_null())
                    .col(ColumnDef::new(Drafts::Criteria3).integer().not_null())
                    .col(ColumnDef::new(Drafts::Criteria4).integer().not_null())
                    .col(ColumnDef::new(Drafts::Criteria5).integer().not_null())
                    .col(ColumnDef::new(Drafts::Comment1).text().not_null())
                    .col(ColumnDef::new(Drafts::Comment2).text().null())
                    .col(ColumnDef::new(Drafts::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Drafts::ModifiedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Drafts::Table, Drafts::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drafts_triple")
                    .table(Drafts::Table)
                    .col(Drafts::ActivityId)
                    .col(Drafts::EvaluatorId)
                    .col(Drafts::PeerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建聚合成绩表（每次聚合整表重建）
        manager
            .create_table(
                Table::create()
                    .table(AggregateGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AggregateGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AggregateGrades::ActivityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AggregateGrades::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AggregateGrades::Criteria1)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AggregateGrades::Criteria2)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AggregateGrades::Criteria3)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AggregateGrades::Criteria4)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AggregateGrades::Criteria5)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AggregateGrades::FinalGrade)
                            .double()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AggregateGrades::Table, AggregateGrades::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_aggregate_grades_activity_student")
                    .table(AggregateGrades::Table)
                    .col(AggregateGrades::ActivityId)
                    .col(AggregateGrades::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建异常标记表（本地信号与外部分析结果共享同一行）
        manager
            .create_table(
                Table::create()
                    .table(Flags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Flags::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Flags::ActivityId).big_integer().not_null())
                    .col(ColumnDef::new(Flags::EvaluatorId).big_integer().not_null())
                    .col(ColumnDef::new(Flags::PeerId).big_integer().not_null())
                    .col(ColumnDef::new(Flags::GroupingId).big_integer().not_null())
                    .col(ColumnDef::new(Flags::GroupId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Flags::CommentDiscrepancy)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Flags::MarkDiscrepancy).boolean().not_null())
                    .col(
                        ColumnDef::new(Flags::QuickSubmissionDiscrepancy)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Flags::MisbehaviourCategory)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Flags::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Flags::Table, Flags::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flags_triple")
                    .table(Flags::Table)
                    .col(Flags::ActivityId)
                    .col(Flags::EvaluatorId)
                    .col(Flags::PeerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AggregateGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Drafts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Criteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionBank::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    DisplayName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    CourseId,
    UserId,
}

#[derive(DeriveIden)]
enum Groups {
    Table,
    Id,
    CourseId,
    GroupingId,
    Name,
}

#[derive(DeriveIden)]
enum GroupMembers {
    Table,
    Id,
    GroupId,
    UserId,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    CourseId,
    GroupingId,
    Name,
}

#[derive(DeriveIden)]
enum Activities {
    Table,
    Id,
    CourseId,
    Name,
    GroupingId,
    LinkedAssignmentId,
    CreatedAt,
    ModifiedAt,
}

#[derive(DeriveIden)]
enum QuestionBank {
    Table,
    Id,
    CourseId,
    QuestionText,
    IsOpenQuestion,
}

#[derive(DeriveIden)]
enum Criteria {
    Table,
    Id,
    ActivityId,
    Slot,
    QuestionText,
    QuestionBankId,
}

#[derive(DeriveIden)]
enum Evaluations {
    Table,
    Id,
    ActivityId,
    EvaluatorId,
    PeerId,
    Criteria1,
    Criteria2,
    Criteria3,
    Criteria4,
    Criteria5,
    Comment1,
    Comment2,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Drafts {
    Table,
    Id,
    ActivityId,
    EvaluatorId,
    PeerId,
    Criteria1,
    Criteria2,
    Criteria3,
    Criteria4,
    Criteria5,
    Comment1,
    Comment2,
    CreatedAt,
    ModifiedAt,
}

#[derive(DeriveIden)]
enum AggregateGrades {
    Table,
    Id,
    ActivityId,
    StudentId,
    Criteria1,
    Criteria2,
    Criteria3,
    Criteria4,
    Criteria5,
    FinalGrade,
}

#[derive(DeriveIden)]
enum Flags {
    Table,
    Id,
    ActivityId,
    EvaluatorId,
    PeerId,
    GroupingId,
    GroupId,
    CommentDiscrepancy,
    MarkDiscrepancy,
    QuickSubmissionDiscrepancy,
    MisbehaviourCategory,
    CreatedAt,
}
