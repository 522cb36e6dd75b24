//! # list 命令实现
//!
//! 按 run 的发现规则列出视频以及将要执行的命令行，不创建任何目录，
//! 也不需要外部工具已安装。
//!
//! ## 依赖关系
//! - 使用 `cli/list.rs` 定义的参数
//! - 使用 `batch/collector.rs`, `tool.rs`, `utils/output.rs`

use crate::batch::{discover, Discovery};
use crate::cli::list::ListArgs;
use crate::error::Result;
use crate::tool::WhisperX;
use crate::utils::output;

use colored::Colorize;

/// 执行 list 命令
pub fn execute(args: ListArgs) -> Result<()> {
    output::print_header("Videos To Transcribe");

    let layout = args.layout.to_layout()?;
    let tool = WhisperX::new(args.tool.to_config());

    let discovery = discover(&layout);
    match &discovery {
        Discovery::Primary(_) => {
            output::print_info(&format!("Source: {}", layout.videos_dir.display()))
        }
        Discovery::Fallback(_) => output::print_warning(&format!(
            "No videos in '{}', using '{}'",
            layout.videos_dir.display(),
            layout.base_dir.display()
        )),
        Discovery::Empty => {
            output::print_warning("No videos found.");
            output::print_info(&format!(
                "Place videos in '{}' or in '{}'",
                layout.videos_dir.display(),
                layout.base_dir.display()
            ));
            return Ok(());
        }
    }

    let files = discovery.files();
    for (i, input) in files.iter().enumerate() {
        output::print_numbered(i + 1, &input.name);
        let command = tool.display_command(input.path(), &layout.output_dir_for(input));
        println!("       {}", command.dimmed());
    }

    output::print_separator();
    output::print_done(&format!("{} videos found", files.len()));

    Ok(())
}
