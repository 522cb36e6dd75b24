//! # 统一错误处理模块
//!
//! 定义 wxbatch 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分级
//! - 致命: `ToolUnavailable`, `Interrupted`，以及顶层未处理的任何错误
//! - 单项: `InputMissing`, `ToolFailed`, I/O 错误（由批量执行器记录为失败，不中断批次）
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// wxbatch 统一错误类型
#[derive(Error, Debug)]
pub enum WxError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create or write: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot find the file {path}")]
    InputMissing { path: String },

    // ─────────────────────────────────────────────────────────────
    // 外部工具错误
    // ─────────────────────────────────────────────────────────────
    #[error("'{command}' is not installed or not on PATH ({reason})")]
    ToolUnavailable { command: String, reason: String },

    #[error("Failed to launch '{command}'")]
    ToolLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} was terminated before finishing")]
    ToolKilled { command: String },

    #[error("{command} exited with {status}\n{stderr}")]
    ToolFailed {
        command: String,
        status: String,
        stderr: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 中断
    // ─────────────────────────────────────────────────────────────
    #[error("Interrupted by user after {completed} of {total} files")]
    Interrupted { completed: usize, total: usize },

    #[error("Failed to install Ctrl-C handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl WxError {
    /// 完整消息，附带底层原因链
    pub fn report(&self) -> String {
        let mut msg = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            msg.push_str(&format!(": {}", cause));
            source = cause.source();
        }
        msg
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, WxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_includes_source() {
        let err = WxError::FileWriteError {
            path: "/r/a".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.report(), "Failed to create or write: /r/a: denied");
    }

    #[test]
    fn test_tool_failed_message_keeps_stderr() {
        let err = WxError::ToolFailed {
            command: "whisperx".into(),
            status: "exit status: 1".into(),
            stderr: "model not found".into(),
        };
        assert!(err.to_string().contains("model not found"));
    }
}
