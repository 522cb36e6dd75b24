//! # wxbatch - WhisperX 批量转录
//!
//! 对一个目录中的视频逐个调用外部 WhisperX 命令行工具，每个视频的结果
//! 放在独立的子目录中，最后输出成功/失败汇总。转录本身完全由外部工具完成。
//!
//! ## 子命令
//! - `run`   - 批量转录（默认）
//! - `check` - 检查 WhisperX 是否可用
//! - `list`  - 列出将要处理的视频与命令
//!
//! ## 退出码
//! - 0   全部成功，或没有找到视频
//! - 1   有视频失败、工具不可用或其他错误
//! - 130 被 Ctrl-C 中断
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/    (发现、顺序执行、报告)
//!   │     ├── tool.rs   (外部工具契约)
//!   │     └── models/   (配置与结果模型)
//!   ├── utils/      (输出、spinner、中断、暂停)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod tool;
mod utils;

use clap::Parser;
use cli::Cli;
use error::{Result, WxError};
use models::RunSummary;
use tracing_subscriber::EnvFilter;
use utils::interrupt::EXIT_INTERRUPTED;
use utils::{output, prompt, InterruptFlag};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let pause = prompt::should_pause(cli.no_pause);
    let code = match InterruptFlag::install() {
        Ok(interrupt) => {
            let result = commands::run(cli.into_command(), &interrupt);
            if let Err(e) = &result {
                print_failure(e);
            }
            // 等待按键时 Ctrl-C 直接退出
            interrupt.exit_on_signal();
            exit_code(&result)
        }
        Err(e) => {
            output::print_error(&e.to_string());
            1
        }
    };

    if pause {
        prompt::wait_for_enter();
    }
    std::process::exit(code);
}

/// 命令结果对应的退出码
fn exit_code(result: &Result<RunSummary>) -> i32 {
    match result {
        Ok(summary) if summary.all_succeeded() => 0,
        Ok(_) => 1,
        Err(WxError::Interrupted { .. }) => EXIT_INTERRUPTED,
        Err(_) => 1,
    }
}

/// 打印命令级错误
fn print_failure(e: &WxError) {
    match e {
        WxError::Interrupted { total: 0, .. } => {
            output::print_warning("Processing interrupted by user.");
        }
        WxError::Interrupted { .. } => {
            output::print_warning(&format!("Processing interrupted by user. {}", e));
        }
        WxError::ToolUnavailable { .. } => {
            output::print_error(&e.to_string());
            output::print_info(&format!("Install WhisperX with: {}", tool::INSTALL_HINT));
        }
        _ => output::print_error(&format!("Unexpected error: {}", e.report())),
    }
}

/// 日志输出到 stderr；`RUST_LOG` 优先于 `-v`
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wxbatch={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(succeeded: usize, failed: usize) -> RunSummary {
        RunSummary {
            succeeded,
            failed,
            total: succeeded + failed,
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&Ok(RunSummary::default())), 0);
        assert_eq!(exit_code(&Ok(summary(3, 0))), 0);
        assert_eq!(exit_code(&Ok(summary(2, 1))), 1);
        assert_eq!(
            exit_code(&Err(WxError::Interrupted {
                completed: 1,
                total: 3
            })),
            EXIT_INTERRUPTED
        );
        assert_eq!(
            exit_code(&Err(WxError::ToolUnavailable {
                command: "whisperx".into(),
                reason: "executable not found".into(),
            })),
            1
        );
        assert_eq!(
            exit_code(&Err(WxError::InvalidArgument("bad".into()))),
            1
        );
    }
}
