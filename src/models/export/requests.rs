use serde::Deserialize;

/// 可导出的数据表
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTable {
    Evaluations,
    Flags,
}

/// CSV 导出参数
#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
    pub table: ExportTable,
}
