//! # 工具函数模块
//!
//! 提供美化输出、进度 spinner、中断标志和退出暂停等工具。
//!
//! ## 依赖关系
//! - 被 `main.rs`, `batch/`, `commands/` 使用
//! - 子模块: output, progress, interrupt, prompt

pub mod interrupt;
pub mod output;
pub mod progress;
pub mod prompt;

pub use interrupt::InterruptFlag;
