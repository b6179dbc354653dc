//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod activities;
mod criteria;
mod drafts;
mod evaluations;
mod flags;
mod grades;
mod roster;

use crate::config::AppConfig;
use crate::errors::{PeerEvalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PeerEvalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PeerEvalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PeerEvalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PeerEvalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 活动模块
    async fn get_activity_by_id(&self, activity_id: i64) -> Result<Option<Activity>> {
        self.get_activity_by_id_impl(activity_id).await
    }

    // 草稿模块
    async fn upsert_draft(&self, draft: NewDraft) -> Result<()> {
        self.upsert_draft_impl(draft).await
    }

    async fn list_drafts(&self, activity_id: i64, evaluator_id: i64) -> Result<Vec<Draft>> {
        self.list_drafts_impl(activity_id, evaluator_id).await
    }

    async fn delete_drafts_for_peers(
        &self,
        activity_id: i64,
        evaluator_id: i64,
        peer_ids: &[i64],
    ) -> Result<u64> {
        self.delete_drafts_for_peers_impl(activity_id, evaluator_id, peer_ids)
            .await
    }

    // 评分条目定义模块
    async fn get_criteria(&self, activity_id: i64) -> Result<Vec<CriterionSlot>> {
        self.get_criteria_impl(activity_id).await
    }

    async fn save_criteria(&self, activity_id: i64, slots: &[CriterionSlot]) -> Result<()> {
        self.save_criteria_impl(activity_id, slots).await
    }

    async fn list_question_bank(&self, course_id: i64) -> Result<Vec<BankQuestion>> {
        self.list_question_bank_impl(course_id).await
    }

    // 互评记录模块
    async fn insert_evaluation(&self, eval: NewEvaluation) -> Result<Evaluation> {
        self.insert_evaluation_impl(eval).await
    }

    async fn list_evaluations(
        &self,
        activity_id: i64,
        evaluator_id: Option<i64>,
    ) -> Result<Vec<Evaluation>> {
        self.list_evaluations_impl(activity_id, evaluator_id).await
    }

    async fn delete_submission(&self, activity_id: i64, evaluator_id: i64) -> Result<bool> {
        self.delete_submission_impl(activity_id, evaluator_id).await
    }

    // 聚合成绩模块
    async fn replace_aggregate_grade(
        &self,
        activity_id: i64,
        grade: NewAggregateGrade,
    ) -> Result<()> {
        self.replace_aggregate_grade_impl(activity_id, grade).await
    }

    async fn list_aggregate_grades(&self, activity_id: i64) -> Result<Vec<AggregateGrade>> {
        self.list_aggregate_grades_impl(activity_id).await
    }

    async fn update_aggregate_grade(
        &self,
        activity_id: i64,
        student_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<AggregateGrade>> {
        self.update_aggregate_grade_impl(activity_id, student_id, update)
            .await
    }

    // 标记模块
    async fn upsert_flag(&self, write: &FlagWrite) -> Result<Flag> {
        self.upsert_flag_impl(write).await
    }

    async fn list_flags(&self, activity_id: i64) -> Result<Vec<Flag>> {
        self.list_flags_impl(activity_id).await
    }

    // 花名册与小组模块
    async fn list_enrolled_user_ids(&self, course_id: i64) -> Result<Vec<i64>> {
        self.list_enrolled_user_ids_impl(course_id).await
    }

    async fn get_user_groups(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Vec<GroupMembership>> {
        self.get_user_groups_impl(course_id, user_id).await
    }

    async fn get_assignment_grouping(&self, assignment_id: i64) -> Result<Option<i64>> {
        self.get_assignment_grouping_impl(assignment_id).await
    }

    async fn get_display_names(&self, user_ids: &[i64]) -> Result<HashMap<i64, String>> {
        self.get_display_names_impl(user_ids).await
    }
}
