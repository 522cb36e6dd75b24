//! # 批量处理模块
//!
//! 视频发现、顺序执行与结果报告。
//!
//! ## 功能
//! - 按扩展名收集视频，支持回退目录
//! - 严格顺序执行，单项失败隔离
//! - CSV 运行报告
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `walkdir`/`glob` 收集文件, `csv` 导出报告

pub mod collector;
pub mod report;
pub mod runner;

pub use collector::{discover, shared_stems, Discovery, VideoCollector};
pub use runner::{BatchResult, BatchRunner};
