use serde::Serialize;

use crate::models::evaluations::entities::Evaluation;

/// 发送给外部分析服务的单条互评记录
///
/// 字段名由外部服务的线协议固定，不随本地命名调整。
/// comment2 是自我反思内容，与同伴差异检测无关，按协议固定发送空串。
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequestRecord {
    pub id: i64,
    #[serde(rename = "userid")]
    pub evaluator_id: i64,
    #[serde(rename = "peerid")]
    pub peer_id: i64,
    #[serde(rename = "spevalid")]
    pub activity_id: i64,
    pub criteria1: Option<i32>,
    pub criteria2: Option<i32>,
    pub criteria3: Option<i32>,
    pub criteria4: Option<i32>,
    pub criteria5: Option<i32>,
    pub comment1: String,
    pub comment2: String,
    #[serde(rename = "timecreated")]
    pub created_at: i64,
}

impl AnalysisRequestRecord {
    /// 将互评记录投影为分析请求记录
    pub fn from_evaluation(eval: &Evaluation) -> Self {
        Self {
            id: eval.id,
            evaluator_id: eval.evaluator_id,
            peer_id: eval.peer_id,
            activity_id: eval.activity_id,
            criteria1: eval.criteria[0],
            criteria2: eval.criteria[1],
            criteria3: eval.criteria[2],
            criteria4: eval.criteria[3],
            criteria5: eval.criteria[4],
            comment1: eval.comment1.clone(),
            comment2: String::new(),
            created_at: eval.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_evaluation() -> Evaluation {
        Evaluation {
            id: 42,
            activity_id: 7,
            evaluator_id: 1,
            peer_id: 2,
            criteria: [Some(4), None, Some(3), Some(5), None],
            comment1: "worked hard".to_string(),
            comment2: "private reflection".to_string(),
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_projection_excludes_comment2() {
        let record = AnalysisRequestRecord::from_evaluation(&sample_evaluation());
        assert_eq!(record.comment1, "worked hard");
        assert_eq!(record.comment2, "");
    }

    #[test]
    fn test_wire_field_names() {
        let record = AnalysisRequestRecord::from_evaluation(&sample_evaluation());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userid"], 1);
        assert_eq!(json["peerid"], 2);
        assert_eq!(json["spevalid"], 7);
        assert_eq!(json["timecreated"], 1_700_000_000_i64);
        assert_eq!(json["criteria1"], 4);
        assert!(json["criteria2"].is_null());
    }
}
