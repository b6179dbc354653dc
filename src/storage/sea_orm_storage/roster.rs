//! 花名册与小组存储操作
//!
//! 这些表由外部协作方同步，本服务只读。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::Entity as Assignments;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::group_members::Column as MemberColumn;
use crate::entity::groups::{Column as GroupColumn, Entity as Groups};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{PeerEvalError, Result};
use crate::models::activities::entities::GroupMembership;
use sea_orm::{ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait};

impl SeaOrmStorage {
    /// 课程的在册学生 ID 集合
    pub async fn list_enrolled_user_ids_impl(&self, course_id: i64) -> Result<Vec<i64>> {
        let rows = Enrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .order_by_asc(EnrollmentColumn::UserId)
            .all(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询花名册失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.user_id).collect())
    }

    /// 用户在课程下的小组归属
    ///
    /// 按 (grouping_id, group_id) 稳定排序，未归入任何分组方案的小组
    /// grouping_id 记为 0，排在最前。
    pub async fn get_user_groups_impl(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Vec<GroupMembership>> {
        let rows = Groups::find()
            .join(JoinType::InnerJoin, crate::entity::groups::Relation::Members.def())
            .filter(GroupColumn::CourseId.eq(course_id))
            .filter(MemberColumn::UserId.eq(user_id))
            .order_by_asc(GroupColumn::GroupingId)
            .order_by_asc(GroupColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询小组归属失败: {e}")))?;

        let mut memberships: Vec<GroupMembership> = rows
            .into_iter()
            .map(|g| GroupMembership {
                grouping_id: g.grouping_id.unwrap_or(0),
                group_id: g.id,
            })
            .collect();

        // NULL 的排序位置随后端数据库而异，统一在内存里再排一次
        memberships.sort_by_key(|m| (m.grouping_id, m.group_id));

        Ok(memberships)
    }

    /// 外部作业配置的分组方案
    pub async fn get_assignment_grouping_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<i64>> {
        let assignment = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(assignment.and_then(|a| a.grouping_id))
    }

    /// 批量查询用户显示名，缺显示名时退回用户名
    pub async fn get_display_names_impl(
        &self,
        user_ids: &[i64],
    ) -> Result<HashMap<i64, String>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Users::find()
            .filter(UserColumn::Id.is_in(user_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| PeerEvalError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|u| (u.id, u.display_name.unwrap_or(u.username)))
            .collect())
    }
}
