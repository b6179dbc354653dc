use serde::{Deserialize, Serialize};

/// 异常标记记录
///
/// 每个 (activity_id, evaluator_id, peer_id) 恰好一行，两个写入方共享：
/// 提交终结器写 quick_submission_discrepancy，AI 分析写其余检测字段。
/// 字段归属见 merge 模块。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub id: i64,
    pub activity_id: i64,
    pub evaluator_id: i64,
    pub peer_id: i64,
    // 被评人所属分组方案与小组，无小组时均为 0
    pub grouping_id: i64,
    pub group_id: i64,
    // 评语与打分不一致（外部检测）
    pub comment_discrepancy: bool,
    // 打分离群（外部检测）
    pub mark_discrepancy: bool,
    // 仓促提交（本地判定，整批同值）
    pub quick_submission_discrepancy: bool,
    // 不当行为类别 1-6，1 表示无异常
    pub misbehaviour_category: i32,
    pub created_at: i64,
}

/// 不当行为类别的默认值（无异常）
pub const MISBEHAVIOUR_NORMAL: i32 = 1;

/// 不当行为类别的人类可读标签
///
/// 数值必须与外部分析服务的 misbehaviour_category_index 保持一致，
/// CSV 导出直接使用该映射。
pub fn misbehaviour_label(category: i32) -> &'static str {
    match category {
        1 => "-",
        2 => "Aggressive or hostile behaviour",
        3 => "Uncooperative or ignoring messages behaviour",
        4 => "Irresponsible or unreliable behaviour",
        5 => "Harassment or inappropriate comments behaviour",
        6 => "Dishonest or plagiarism behaviour",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misbehaviour_labels() {
        assert_eq!(misbehaviour_label(1), "-");
        assert_eq!(misbehaviour_label(2), "Aggressive or hostile behaviour");
        assert_eq!(misbehaviour_label(6), "Dishonest or plagiarism behaviour");
    }

    #[test]
    fn test_misbehaviour_label_out_of_range() {
        assert_eq!(misbehaviour_label(0), "Unknown");
        assert_eq!(misbehaviour_label(7), "Unknown");
    }
}
