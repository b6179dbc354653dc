//! 活动存储操作

use super::SeaOrmStorage;
use crate::entity::activities::Entity as Activities;
use crate::errors::{PeerEvalError, Result};
use crate::models::activities::entities::Activity;
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    /// 通过 ID 获取互评活动
    pub async fn get_activity_by_id_impl(&self, activity_id: i64) -> Result<Option<Activity>> {
        let result = Activities::find_by_id(activity_id)
            .one(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_activity()))
    }
}
