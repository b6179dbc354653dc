use serde::Deserialize;
use std::collections::HashMap;

use super::entities::CRITERIA_COUNT;

/// 保存草稿请求
///
/// 评分人身份是显式参数，不依赖任何隐式会话上下文。
/// criteria 是定长数组：criteria[i] 为第 i+1 条评分的 peer_id -> 分值 映射。
#[derive(Debug, Clone, Deserialize)]
pub struct SaveDraftRequest {
    pub evaluator_id: i64,
    #[serde(default)]
    pub criteria: [HashMap<i64, i32>; CRITERIA_COUNT],
    #[serde(default)]
    pub comments1: HashMap<i64, String>,
    #[serde(default)]
    pub comments2: HashMap<i64, String>,
}

/// 最终提交请求
///
/// start_time 由客户端在打开表单时记录，用于仓促提交判定。
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitEvaluationRequest {
    pub evaluator_id: i64,
    pub start_time: i64,
    #[serde(default)]
    pub criteria: [HashMap<i64, i32>; CRITERIA_COUNT],
    #[serde(default)]
    pub comments1: HashMap<i64, String>,
    #[serde(default)]
    pub comments2: HashMap<i64, String>,
}

/// 草稿读取参数
#[derive(Debug, Clone, Deserialize)]
pub struct DraftQuery {
    pub evaluator_id: i64,
}

/// 存储层使用的草稿写入记录（整行覆盖）
#[derive(Debug, Clone, PartialEq)]
pub struct NewDraft {
    pub activity_id: i64,
    pub evaluator_id: i64,
    pub peer_id: i64,
    pub criteria: [i32; CRITERIA_COUNT],
    pub comment1: String,
    pub comment2: Option<String>,
    pub modified_at: i64,
}

/// 存储层使用的最终记录写入
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvaluation {
    pub activity_id: i64,
    pub evaluator_id: i64,
    pub peer_id: i64,
    pub criteria: [Option<i32>; CRITERIA_COUNT],
    pub comment1: String,
    pub comment2: String,
    pub created_at: i64,
}
