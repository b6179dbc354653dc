//! PeerEval - 自我与同伴互评后端服务
//!
//! 基于 Actix Web 构建的互评成绩聚合与异常标记系统后端。
//!
//! # 架构
//! - `analysis`: 外部 AI 分析网关与标记合并
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `tasks`: 后台异步任务队列
//! - `utils`: 工具函数

pub mod analysis;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod tasks;
pub mod utils;
