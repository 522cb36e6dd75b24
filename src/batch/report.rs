//! # 运行报告导出
//!
//! 将每个视频的处理结果导出为 CSV，一行一项。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `models/outcome.rs` 的 ItemOutcome
//! - 使用 `csv` + `serde` 写入

use crate::error::{Result, WxError};
use crate::models::ItemOutcome;

use serde::Serialize;
use std::path::Path;

/// CSV 行
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    index: usize,
    file: String,
    output_dir: String,
    status: &'a str,
    reason: &'a str,
}

impl<'a> From<&'a ItemOutcome> for ReportRow<'a> {
    fn from(outcome: &'a ItemOutcome) -> Self {
        ReportRow {
            index: outcome.index,
            file: outcome.input.path().display().to_string(),
            output_dir: outcome.output_dir.display().to_string(),
            status: outcome.status.label(),
            reason: outcome.status.reason().unwrap_or(""),
        }
    }
}

/// 写入运行报告
pub fn write_csv(outcomes: &[ItemOutcome], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for outcome in outcomes {
        wtr.serialize(ReportRow::from(outcome))?;
    }

    wtr.flush().map_err(|e| WxError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
