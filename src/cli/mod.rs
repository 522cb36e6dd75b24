//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 批量转录（不带子命令时的默认行为）
//! - `check`: 只检查外部工具是否可用
//! - `list`: 只列出将要处理的视频和对应命令
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: run, check, list

pub mod check;
pub mod list;
pub mod run;

use clap::{ArgAction, Parser, Subcommand};

/// wxbatch - WhisperX 批量转录
#[derive(Parser, Debug)]
#[command(name = "wxbatch")]
#[command(version)]
#[command(about = "Batch-transcribe a folder of videos with WhisperX", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options for the default `run` command
    #[command(flatten)]
    pub run: run::RunArgs,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Do not wait for Enter before exiting
    #[arg(long, env = "WXBATCH_NO_PAUSE", global = true)]
    pub no_pause: bool,
}

impl Cli {
    /// 解析出要执行的命令，未给子命令时等价于 `run`
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Run(self.run))
    }
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe every video found (default)
    Run(run::RunArgs),

    /// Check that the WhisperX executable can be launched
    Check(check::CheckArgs),

    /// List the videos that would be processed and the commands to run
    List(list::ListArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComputeType, Device};

    #[test]
    fn test_no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["wxbatch", "--model", "small", "--no-pause"]).unwrap();
        assert!(cli.no_pause);
        match cli.into_command() {
            Commands::Run(args) => assert_eq!(args.tool.model, "small"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_run_subcommand_options() {
        let cli = Cli::try_parse_from([
            "wxbatch",
            "run",
            "--device",
            "cuda",
            "--compute-type",
            "float32",
            "--report",
            "out.csv",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.into_command() {
            Commands::Run(args) => {
                assert_eq!(args.tool.device, Device::Cuda);
                assert_eq!(args.tool.compute_type, ComputeType::Float32);
                assert_eq!(args.report.as_deref(), Some(std::path::Path::new("out.csv")));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_check_and_list_parse() {
        let cli = Cli::try_parse_from(["wxbatch", "check", "--whisperx", "/opt/wx"]).unwrap();
        assert!(matches!(cli.into_command(), Commands::Check(a) if a.tool.executable == "/opt/wx"));

        let cli = Cli::try_parse_from(["wxbatch", "list", "--base-dir", "/data"]).unwrap();
        assert!(matches!(cli.into_command(), Commands::List(_)));
    }

    #[test]
    fn test_rejects_unknown_device() {
        assert!(Cli::try_parse_from(["wxbatch", "--device", "tpu"]).is_err());
    }
}
