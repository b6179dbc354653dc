//! 后台分析任务队列
//!
//! 同步分析失败时把任务丢进进程内队列，由常驻 worker 异步重试一次。
//! 队列不落盘，进程重启后未消费的任务丢失（教师可随时手动重跑分析）。

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::analysis::{AnalysisGateway, reconciler};
use crate::errors::{PeerEvalError, Result};
use crate::storage::Storage;

/// 一次待执行的分析
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTask {
    pub activity_id: i64,
    // None 表示全活动分析
    pub evaluator_id: Option<i64>,
}

/// 进程内任务队列的发送端
#[derive(Clone)]
pub struct TaskQueue {
    tx: UnboundedSender<AnalysisTask>,
}

impl TaskQueue {
    /// 创建队列，接收端交给 worker
    pub fn new() -> (Self, UnboundedReceiver<AnalysisTask>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// 入队一个分析任务
    pub fn enqueue(&self, task: AnalysisTask) -> Result<()> {
        self.tx
            .send(task)
            .map_err(|e| PeerEvalError::task_queue(format!("任务入队失败: {e}")))
    }
}

/// 启动常驻分析 worker
///
/// worker 内的失败只记日志，不会让进程退出。
pub fn spawn_analysis_worker(
    storage: Arc<dyn Storage>,
    gateway: Arc<AnalysisGateway>,
    mut rx: UnboundedReceiver<AnalysisTask>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("分析 worker 已启动");
        while let Some(task) = rx.recv().await {
            info!(
                "执行后台分析: activity={}, evaluator={:?}",
                task.activity_id, task.evaluator_id
            );
            if let Err(e) = reconciler::run_analysis(
                &storage,
                &gateway,
                task.activity_id,
                task.evaluator_id,
            )
            .await
            {
                warn!("后台分析失败: activity={}: {e}", task.activity_id);
            }
        }
        info!("分析 worker 已退出");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enqueue_delivers_task() {
        let (queue, mut rx) = TaskQueue::new();
        let task = AnalysisTask {
            activity_id: 7,
            evaluator_id: Some(3),
        };
        queue.enqueue(task.clone()).unwrap();
        assert_eq!(rx.recv().await, Some(task));
    }

    #[tokio::test]
    async fn test_enqueue_after_receiver_dropped_errors() {
        let (queue, rx) = TaskQueue::new();
        drop(rx);
        let result = queue.enqueue(AnalysisTask {
            activity_id: 1,
            evaluator_id: None,
        });
        assert!(result.is_err());
    }
}
