//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_peereval_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PeerEvalError {
            $($variant(String),)*
        }

        impl PeerEvalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PeerEvalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PeerEvalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PeerEvalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PeerEvalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PeerEvalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_peereval_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Serialization("E006", "Serialization Error"),
    AnalysisGateway("E007", "Analysis Gateway Error"),
    TaskQueue("E008", "Task Queue Error"),
    CsvExport("E009", "CSV Export Error"),
}

impl PeerEvalError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PeerEvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PeerEvalError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PeerEvalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PeerEvalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PeerEvalError {
    fn from(err: std::io::Error) -> Self {
        PeerEvalError::DatabaseConfig(err.to_string())
    }
}

impl From<serde_json::Error> for PeerEvalError {
    fn from(err: serde_json::Error) -> Self {
        PeerEvalError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for PeerEvalError {
    fn from(err: reqwest::Error) -> Self {
        PeerEvalError::AnalysisGateway(err.to_string())
    }
}

impl From<csv::Error> for PeerEvalError {
    fn from(err: csv::Error) -> Self {
        PeerEvalError::CsvExport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PeerEvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PeerEvalError::database_config("test").code(), "E001");
        assert_eq!(PeerEvalError::validation("test").code(), "E004");
        assert_eq!(PeerEvalError::analysis_gateway("test").code(), "E007");
        assert_eq!(PeerEvalError::task_queue("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PeerEvalError::analysis_gateway("test").error_type(),
            "Analysis Gateway Error"
        );
        assert_eq!(
            PeerEvalError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = PeerEvalError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = PeerEvalError::analysis_gateway("connection refused");
        let formatted = err.format_simple();
        assert!(formatted.contains("Analysis Gateway Error"));
        assert!(formatted.contains("connection refused"));
    }
}
