use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    activities::entities::{Activity, GroupMembership},
    criteria::entities::{BankQuestion, CriterionSlot},
    evaluations::{
        entities::{Draft, Evaluation},
        requests::{NewDraft, NewEvaluation},
    },
    flags::{entities::Flag, merge::FlagWrite},
    grades::{
        entities::AggregateGrade,
        requests::{NewAggregateGrade, UpdateGradeRequest},
    },
};

use crate::errors::Result;

#[cfg(test)]
pub mod mock;
pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 活动
    // 通过 ID 获取互评活动
    async fn get_activity_by_id(&self, activity_id: i64) -> Result<Option<Activity>>;

    /// 草稿
    // 按 (activity, evaluator, peer) 整行覆盖草稿
    async fn upsert_draft(&self, draft: NewDraft) -> Result<()>;
    // 列出评分人在某活动下的全部草稿
    async fn list_drafts(&self, activity_id: i64, evaluator_id: i64) -> Result<Vec<Draft>>;
    // 最终提交时按批删除草稿
    async fn delete_drafts_for_peers(
        &self,
        activity_id: i64,
        evaluator_id: i64,
        peer_ids: &[i64],
    ) -> Result<u64>;

    /// 评分条目定义
    // 活动的评分条目定义行，按槽位升序
    async fn get_criteria(&self, activity_id: i64) -> Result<Vec<CriterionSlot>>;
    // 整组覆盖活动的评分条目定义
    async fn save_criteria(&self, activity_id: i64, slots: &[CriterionSlot]) -> Result<()>;
    // 课程题库（外部协作方维护，本服务只读）
    async fn list_question_bank(&self, course_id: i64) -> Result<Vec<BankQuestion>>;

    /// 最终互评记录
    // 插入一条最终记录（提交后不可变）
    async fn insert_evaluation(&self, eval: NewEvaluation) -> Result<Evaluation>;
    // 列出活动下的互评记录，可选限定单个评分人
    async fn list_evaluations(
        &self,
        activity_id: i64,
        evaluator_id: Option<i64>,
    ) -> Result<Vec<Evaluation>>;
    // 管理员删除某评分人的提交，级联删除其标记与成绩行
    async fn delete_submission(&self, activity_id: i64, evaluator_id: i64) -> Result<bool>;

    /// 聚合成绩
    // 替换单个学生的成绩行（delete+insert）
    async fn replace_aggregate_grade(
        &self,
        activity_id: i64,
        grade: NewAggregateGrade,
    ) -> Result<()>;
    // 列出活动下全部成绩行
    async fn list_aggregate_grades(&self, activity_id: i64) -> Result<Vec<AggregateGrade>>;
    // 教师手工覆盖某学生的成绩
    async fn update_aggregate_grade(
        &self,
        activity_id: i64,
        student_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<AggregateGrade>>;

    /// 异常标记
    // 按字段归属合并写入标记行
    async fn upsert_flag(&self, write: &FlagWrite) -> Result<Flag>;
    // 列出活动下全部标记行
    async fn list_flags(&self, activity_id: i64) -> Result<Vec<Flag>>;

    /// 花名册与小组（外部协作方数据）
    // 课程的在册学生 ID 集合
    async fn list_enrolled_user_ids(&self, course_id: i64) -> Result<Vec<i64>>;
    // 用户在课程下的小组归属，按 (grouping_id, group_id) 稳定排序
    async fn get_user_groups(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Vec<GroupMembership>>;
    // 外部作业配置的分组方案
    async fn get_assignment_grouping(&self, assignment_id: i64) -> Result<Option<i64>>;
    // 批量查询用户显示名（CSV 导出用）
    async fn get_display_names(&self, user_ids: &[i64]) -> Result<HashMap<i64, String>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
