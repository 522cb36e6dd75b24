//! # run 命令实现
//!
//! 批量转录目录中的视频。
//!
//! ## 功能
//! - 外部工具可用性检查（失败即中止）
//! - 输入目录不存在时创建并提示
//! - 发现视频（含回退目录）
//! - 顺序转录，每个视频独立输出目录
//! - 汇总统计、失败列表与可选 CSV 报告（中断时同样输出已完成部分）
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `batch/` 发现与执行, `tool.rs` 调用外部工具
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{discover, report, shared_stems, BatchResult, BatchRunner, Discovery};
use crate::cli::run::RunArgs;
use crate::error::{Result, WxError};
use crate::models::{InputFile, Layout, RunSummary};
use crate::tool::WhisperX;
use crate::utils::{output, progress, InterruptFlag};

use std::fs;
use std::path::Path;
use tabled::{Table, Tabled};
use tracing::debug;

/// 执行 run 命令
pub fn execute(args: RunArgs, interrupt: &InterruptFlag) -> Result<RunSummary> {
    output::print_header("WhisperX Batch Transcription");

    let layout = args.layout.to_layout()?;
    let tool = WhisperX::new(args.tool.to_config());
    debug!(?layout, config = ?tool.config(), "resolved configuration");

    // 可用性检查
    let help_line = tool.check_available(interrupt)?;
    debug!(help = %help_line, "tool available");

    // 输入目录不存在：创建后直接结束
    if !layout.videos_dir.exists() {
        output::print_info(&format!(
            "Creating videos folder at: {}",
            layout.videos_dir.display()
        ));
        fs::create_dir_all(&layout.videos_dir).map_err(|e| WxError::FileWriteError {
            path: layout.videos_dir.display().to_string(),
            source: e,
        })?;
        output::print_warning(&format!(
            "Please place your videos in: {}",
            layout.videos_dir.display()
        ));
        return Ok(RunSummary::default());
    }

    fs::create_dir_all(&layout.results_dir).map_err(|e| WxError::FileWriteError {
        path: layout.results_dir.display().to_string(),
        source: e,
    })?;

    // 发现视频
    let discovery = discover(&layout);
    if !matches!(discovery, Discovery::Primary(_)) {
        output::print_warning(&format!(
            "No videos found in '{}'.",
            layout.videos_dir.display()
        ));
        output::print_info(&format!(
            "Searching the program folder '{}'...",
            layout.base_dir.display()
        ));
    }

    let files = discovery.into_files();
    if files.is_empty() {
        output::print_warning("No videos found to process.");
        output::print_info(&format!(
            "Place your videos in '{}' or in '{}'",
            layout.videos_dir.display(),
            layout.base_dir.display()
        ));
        return Ok(RunSummary::default());
    }

    output::print_info(&format!("Found {} videos to process:", files.len()));
    for (i, input) in files.iter().enumerate() {
        output::print_numbered(i + 1, &input.name);
    }
    for stem in shared_stems(&files) {
        output::print_warning(&format!(
            "Several videos are named '{}'; they share the output folder '{}'",
            stem,
            layout.results_dir.join(stem).display()
        ));
    }

    // 顺序处理
    let runner = BatchRunner::new(&layout, interrupt.clone());
    let result = runner.run(&files, |input, output_dir| {
        transcribe_one(&tool, input, output_dir, interrupt)
    });

    finish(&result, files.len(), &layout, args.report.as_deref())
}

/// 汇总、失败列表与报告；被中断的批次在输出已完成部分后返回 `Interrupted`
fn finish(
    result: &BatchResult,
    total: usize,
    layout: &Layout,
    report_path: Option<&Path>,
) -> Result<RunSummary> {
    let summary = result.summary();
    print_summary(&summary);
    print_failure_table(result);

    if let Some(report_path) = report_path {
        report::write_csv(&result.outcomes, report_path)?;
        output::print_info(&format!("Report written to '{}'", report_path.display()));
    }

    if summary.succeeded > 0 {
        output::print_done(&format!(
            "Results are in: {}",
            layout.results_dir.display()
        ));
    }

    match result.interruption(total) {
        Some(e) => Err(e),
        None => Ok(summary),
    }
}

/// 转录单个视频，运行期间显示 spinner
fn transcribe_one(
    tool: &WhisperX,
    input: &InputFile,
    output_dir: &Path,
    interrupt: &InterruptFlag,
) -> Result<()> {
    let spinner = progress::create_spinner(&format!("Transcribing {}", input.name));
    let result = tool.transcribe(input.path(), output_dir, interrupt);
    spinner.finish_and_clear();
    result.map(|_| ())
}

/// 打印汇总
fn print_summary(summary: &RunSummary) {
    output::print_header("Processing Summary");
    output::print_success(&format!("Transcribed successfully: {}", summary.succeeded));
    if summary.failed > 0 {
        output::print_error(&format!("Failed: {}", summary.failed));
    } else {
        output::print_info("Failed: 0");
    }
    output::print_info(&format!("Total: {}", summary.total));
    output::print_separator();
}

/// 打印失败列表
fn print_failure_table(result: &BatchResult) {
    #[derive(Tabled)]
    struct FailureRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Video")]
        video: String,
        #[tabled(rename = "Reason")]
        reason: String,
    }

    let rows: Vec<FailureRow> = result
        .failures()
        .map(|o| FailureRow {
            index: o.index,
            video: o.input.name.clone(),
            reason: short_reason(o.status.reason().unwrap_or_default()),
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }
}

/// 取最后一个非空行（Python traceback 的最后一行就是异常本身），截断到 80 字符
fn short_reason(reason: &str) -> String {
    let line = reason
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .unwrap_or_default();

    if line.chars().count() > 80 {
        let cut: String = line.chars().take(77).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}
