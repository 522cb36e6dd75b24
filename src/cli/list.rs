//! # list 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/list.rs`

use super::run::{LayoutArgs, ToolArgs};
use clap::Args;

/// list 子命令参数
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub tool: ToolArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,
}
