//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `models/`, `tool.rs`, `utils/`
//! - 子模块: run, check, list

pub mod check;
pub mod list;
pub mod run;

use crate::cli::Commands;
use crate::error::Result;
use crate::models::RunSummary;
use crate::utils::InterruptFlag;

/// 执行命令，返回的汇总用于决定退出码（`check`/`list` 返回空汇总）
pub fn run(cmd: Commands, interrupt: &InterruptFlag) -> Result<RunSummary> {
    match cmd {
        Commands::Run(args) => run::execute(args, interrupt),
        Commands::Check(args) => check::execute(args, interrupt).map(|_| RunSummary::default()),
        Commands::List(args) => list::execute(args).map(|_| RunSummary::default()),
    }
}
