//! 聚合成绩的纯计算
//!
//! 每条评分的均值各自独立：只对该条的非空分值求平均。
//! 最终成绩是合并均值：全部非空分值求和再除以非空计数，
//! 各条应答人数不同时与"五条均值再平均"数值不同。

use crate::models::evaluations::entities::{CRITERIA_COUNT, Evaluation};
use crate::models::grades::requests::NewAggregateGrade;

/// 对单个学生收到的全部评分做聚合
///
/// 未被任何人评价时返回全 0 行（花名册全员都必须有成绩行）。
pub fn aggregate_for_student(evaluations: &[Evaluation], student_id: i64) -> NewAggregateGrade {
    let received: Vec<&Evaluation> = evaluations
        .iter()
        .filter(|e| e.peer_id == student_id)
        .collect();

    let mut criteria = [0f64; CRITERIA_COUNT];
    let mut pooled_sum = 0f64;
    let mut pooled_count = 0usize;

    for (i, slot) in criteria.iter_mut().enumerate() {
        let values: Vec<i32> = received.iter().filter_map(|e| e.criteria[i]).collect();
        if !values.is_empty() {
            let sum: i32 = values.iter().sum();
            *slot = f64::from(sum) / values.len() as f64;
            pooled_sum += f64::from(sum);
            pooled_count += values.len();
        }
    }

    let final_grade = if pooled_count > 0 {
        pooled_sum / pooled_count as f64
    } else {
        0.0
    };

    NewAggregateGrade {
        student_id,
        criteria,
        final_grade,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(
        evaluator_id: i64,
        peer_id: i64,
        criteria: [Option<i32>; CRITERIA_COUNT],
    ) -> Evaluation {
        Evaluation {
            id: 0,
            activity_id: 10,
            evaluator_id,
            peer_id,
            criteria,
            comment1: String::new(),
            comment2: String::new(),
            created_at: 0,
        }
    }

    #[test]
    fn test_pooled_mean_differs_from_mean_of_means() {
        // 三个非空分值 4 + 5 + 2 = 11，合并均值 11/3
        let evals = [
            evaluation(1, 9, [Some(4), Some(5), None, None, None]),
            evaluation(2, 9, [Some(2), None, None, None, None]),
        ];
        let grade = aggregate_for_student(&evals, 9);
        assert!((grade.final_grade - 11.0 / 3.0).abs() < 1e-9);
        // 五条均值再平均会得到 (3 + 5)/2 = 4，确认没有采用
        assert!((grade.final_grade - 4.0).abs() > 0.1);
    }

    #[test]
    fn test_per_criterion_means_are_independent() {
        let evals = [
            evaluation(1, 9, [Some(4), Some(5), None, None, None]),
            evaluation(2, 9, [Some(2), None, None, None, None]),
        ];
        let grade = aggregate_for_student(&evals, 9);
        assert!((grade.criteria[0] - 3.0).abs() < 1e-9);
        assert!((grade.criteria[1] - 5.0).abs() < 1e-9);
        assert_eq!(grade.criteria[2], 0.0);
    }

    #[test]
    fn test_unevaluated_student_gets_zero_row() {
        let evals = [evaluation(1, 9, [Some(4), None, None, None, None])];
        let grade = aggregate_for_student(&evals, 7);
        assert_eq!(grade.criteria, [0.0; CRITERIA_COUNT]);
        assert_eq!(grade.final_grade, 0.0);
    }

    #[test]
    fn test_only_received_rows_counted() {
        // 学生 9 自己打出去的分不计入
        let evals = [
            evaluation(9, 2, [Some(1), None, None, None, None]),
            evaluation(2, 9, [Some(5), None, None, None, None]),
        ];
        let grade = aggregate_for_student(&evals, 9);
        assert!((grade.final_grade - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_self_evaluation_counts_as_received() {
        let evals = [
            evaluation(9, 9, [Some(3), None, None, None, None]),
            evaluation(2, 9, [Some(5), None, None, None, None]),
        ];
        let grade = aggregate_for_student(&evals, 9);
        assert!((grade.final_grade - 4.0).abs() < 1e-9);
    }
}
