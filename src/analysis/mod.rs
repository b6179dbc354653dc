//! AI 分析集成
//!
//! 把最终互评记录投影成外部分析服务的线协议、发起调用，
//! 并把返回的结果落回标记表。分析失败从不中断主流程，只记日志。

pub mod gateway;
pub mod groups;
pub mod reconciler;

pub use gateway::AnalysisGateway;
