//! # 数据模型模块
//!
//! 定义运行配置、输入文件和处理结果数据模型。
//!
//! ## 依赖关系
//! - 被 `cli/`, `batch/`, `commands/` 使用
//! - 子模块: config, outcome

pub mod config;
pub mod outcome;

pub use config::{ComputeType, Device, Layout, TranscribeConfig};
pub use outcome::{InputFile, ItemOutcome, ItemStatus, RunSummary};
