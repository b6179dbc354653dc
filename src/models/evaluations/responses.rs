use serde::{Deserialize, Serialize};

/// 保存草稿结果
///
/// 逐行 upsert 为尽力而为：任一行失败整体报 false，但已写入的行不回滚。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSaveResponse {
    pub saved: bool,
    pub rows: usize,
}

/// 最终提交结果
///
/// submitted 为 false 表示输入缺少第 1 条评分、按无提交处理；
/// 分析环节的成败从不影响该字段。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub submitted: bool,
    pub peers: usize,
    pub quick_submission: bool,
}
