//! # check 命令实现
//!
//! 只运行一次 `<tool> --help`，确认外部工具可用。
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `tool.rs`, `utils/output.rs`

use crate::cli::check::CheckArgs;
use crate::error::Result;
use crate::tool::WhisperX;
use crate::utils::{output, InterruptFlag};

/// 执行 check 命令
pub fn execute(args: CheckArgs, interrupt: &InterruptFlag) -> Result<()> {
    output::print_header("WhisperX Availability Check");

    let tool = WhisperX::new(args.tool.to_config());
    let first_line = tool.check_available(interrupt)?;

    output::print_success(&format!("'{}' is available", tool.executable()));
    if !first_line.is_empty() {
        output::print_info(&first_line);
    }

    Ok(())
}
