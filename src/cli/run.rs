//! # run 子命令 CLI 定义
//!
//! 批量转录参数，以及 `check`/`list` 共用的工具参数和目录参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/check.rs`, `cli/list.rs` 使用
//! - 参数传递给 `commands/run.rs`，转换为 `models/config.rs` 中的配置

use crate::error::{Result, WxError};
use crate::models::config::{DEFAULT_ALIGN_MODEL, DEFAULT_EXECUTABLE, DEFAULT_MODEL};
use crate::models::{ComputeType, Device, Layout, TranscribeConfig};

use clap::Args;
use std::path::{Path, PathBuf};

/// 外部工具参数
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// WhisperX executable name or path
    #[arg(long = "whisperx", env = "WHISPERX_BIN", default_value = DEFAULT_EXECUTABLE)]
    pub executable: String,

    /// Whisper model size (tiny, base, small, medium, large-v2, ...)
    #[arg(long, env = "WHISPERX_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Compute device
    #[arg(long, env = "WHISPERX_DEVICE", value_enum, default_value_t = Device::Cpu)]
    pub device: Device,

    /// Phoneme alignment model
    #[arg(long, env = "WHISPERX_ALIGN_MODEL", default_value = DEFAULT_ALIGN_MODEL)]
    pub align_model: String,

    /// Numeric precision
    #[arg(long, env = "WHISPERX_COMPUTE_TYPE", value_enum, default_value_t = ComputeType::Int8)]
    pub compute_type: ComputeType,
}

impl ToolArgs {
    pub fn to_config(&self) -> TranscribeConfig {
        TranscribeConfig {
            executable: self.executable.clone(),
            model: self.model.clone(),
            device: self.device,
            align_model: self.align_model.clone(),
            compute_type: self.compute_type,
        }
    }
}

/// 目录参数
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Base directory [default: directory containing the wxbatch executable]
    #[arg(long, env = "WXBATCH_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Input folder with videos [default: <base-dir>/videos]
    #[arg(long, env = "WXBATCH_VIDEOS_DIR")]
    pub videos_dir: Option<PathBuf>,

    /// Results folder, one subfolder per video [default: <base-dir>/whisperx_results]
    #[arg(long, env = "WXBATCH_RESULTS_DIR")]
    pub results_dir: Option<PathBuf>,

    /// Video extensions to pick up, comma-separated, case-sensitive
    #[arg(long, env = "WXBATCH_EXTENSIONS", default_value = "mp4,avi,mov,mkv,webm")]
    pub extensions: String,
}

impl LayoutArgs {
    /// 解析为绝对路径布局
    pub fn to_layout(&self) -> Result<Layout> {
        let base_dir = match &self.base_dir {
            Some(dir) => absolutize(dir)?,
            None => program_dir()?,
        };

        let mut layout = Layout::new(base_dir);
        if let Some(dir) = &self.videos_dir {
            layout = layout.with_videos_dir(absolutize(dir)?);
        }
        if let Some(dir) = &self.results_dir {
            layout = layout.with_results_dir(absolutize(dir)?);
        }

        Ok(layout.with_extensions(&self.extensions))
    }
}

/// run 子命令参数
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub tool: ToolArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Write a per-file CSV report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// 可执行文件所在目录
fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| WxError::FileReadError {
        path: "<current executable>".to_string(),
        source: e,
    })?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        WxError::InvalidArgument(format!(
            "cannot determine the directory of {}",
            exe.display()
        ))
    })
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| WxError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}
