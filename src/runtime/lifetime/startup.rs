use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::analysis::AnalysisGateway;
use crate::storage::Storage;
use crate::tasks::{self, TaskQueue};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub gateway: Arc<AnalysisGateway>,
    pub tasks: TaskQueue,
    pub analysis_worker: JoinHandle<()>,
}

/// 准备服务器启动的上下文
/// 包括存储、分析网关和后台 worker
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let gateway = Arc::new(AnalysisGateway::from_config());

    // 启动后台分析 worker，承接提交路径失败后入队的任务
    let (tasks, rx) = TaskQueue::new();
    let analysis_worker = tasks::spawn_analysis_worker(storage.clone(), gateway.clone(), rx);
    warn!("Analysis worker started");

    StartupContext {
        storage,
        gateway,
        tasks,
        analysis_worker,
    }
}
