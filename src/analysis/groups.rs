//! 小组归属解析
//!
//! 标记行带 (grouping_id, group_id) 方便教师按组排查。活动可以直接
//! 绑定分组方案，也可以沿用链接作业的方案；两者都没有时在全部小组
//! 里取排序最前的一条。完全无归属时记哨兵 (0, 0)。

use crate::errors::Result;
use crate::models::activities::entities::{Activity, GroupMembership};
use crate::storage::Storage;

/// 从用户的小组归属里挑出标记行要记录的那一条
///
/// 归属列表必须已按 (grouping_id, group_id) 稳定排序。
pub fn pick_group(
    memberships: &[GroupMembership],
    preferred_grouping: Option<i64>,
) -> GroupMembership {
    match preferred_grouping {
        Some(grouping_id) => memberships
            .iter()
            .find(|m| m.grouping_id == grouping_id)
            .copied()
            // 方案内无小组时保留方案 ID，组记 0
            .unwrap_or(GroupMembership {
                grouping_id,
                group_id: 0,
            }),
        None => memberships
            .first()
            .copied()
            .unwrap_or(GroupMembership {
                grouping_id: 0,
                group_id: 0,
            }),
    }
}

/// 解析某用户在活动语境下的小组归属
pub async fn resolve_group(
    storage: &dyn Storage,
    activity: &Activity,
    user_id: i64,
) -> Result<GroupMembership> {
    let preferred = match activity.grouping_id {
        Some(grouping_id) => Some(grouping_id),
        None => match activity.linked_assignment_id {
            Some(assignment_id) => storage.get_assignment_grouping(assignment_id).await?,
            None => None,
        },
    };

    let memberships = storage.get_user_groups(activity.course_id, user_id).await?;
    Ok(pick_group(&memberships, preferred))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(grouping_id: i64, group_id: i64) -> GroupMembership {
        GroupMembership {
            grouping_id,
            group_id,
        }
    }

    #[test]
    fn test_preferred_grouping_wins() {
        let memberships = [membership(0, 3), membership(2, 8), membership(5, 4)];
        let picked = pick_group(&memberships, Some(5));
        assert_eq!(picked, membership(5, 4));
    }

    #[test]
    fn test_no_preference_takes_first_sorted() {
        let memberships = [membership(0, 3), membership(2, 8)];
        let picked = pick_group(&memberships, None);
        assert_eq!(picked, membership(0, 3));
    }

    #[test]
    fn test_preferred_grouping_without_group_keeps_grouping() {
        let memberships = [membership(2, 8)];
        let picked = pick_group(&memberships, Some(5));
        assert_eq!(picked, membership(5, 0));
    }

    #[test]
    fn test_no_membership_yields_sentinel() {
        let picked = pick_group(&[], None);
        assert_eq!(picked, membership(0, 0));
    }
}
