//! # 运行配置数据模型
//!
//! 外部转录工具的调用参数与目录布局。原本写死的常量在这里变成
//! 显式的配置结构，由 `cli/` 解析后传入批量执行器。
//!
//! ## 依赖关系
//! - 被 `cli/run.rs` 构造
//! - 被 `tool.rs`, `batch/`, `commands/` 使用

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

use super::outcome::InputFile;

/// 默认可执行文件名
pub const DEFAULT_EXECUTABLE: &str = "whisperx";
/// 默认模型大小
pub const DEFAULT_MODEL: &str = "medium";
/// 默认对齐模型
pub const DEFAULT_ALIGN_MODEL: &str = "WAV2VEC2_ASR_BASE_960H";
/// 默认识别的视频扩展名（大小写敏感）
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "webm"];
/// 输入暂存目录名
pub const VIDEOS_DIR_NAME: &str = "videos";
/// 结果目录名
pub const RESULTS_DIR_NAME: &str = "whisperx_results";

/// 计算设备
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Device {
    /// Run on the CPU
    #[default]
    Cpu,
    /// Run on an NVIDIA GPU
    Cuda,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 数值精度
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ComputeType {
    /// 8-bit quantized weights
    #[default]
    Int8,
    /// Full 32-bit floats
    Float32,
}

impl ComputeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputeType::Int8 => "int8",
            ComputeType::Float32 => "float32",
        }
    }
}

impl fmt::Display for ComputeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 外部转录工具调用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscribeConfig {
    /// 可执行文件（名称或路径）
    pub executable: String,
    /// `--model`
    pub model: String,
    /// `--device`
    pub device: Device,
    /// `--align_model`
    pub align_model: String,
    /// `--compute_type`
    pub compute_type: ComputeType,
}

impl Default for TranscribeConfig {
    fn default() -> Self {
        TranscribeConfig {
            executable: DEFAULT_EXECUTABLE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            device: Device::default(),
            align_model: DEFAULT_ALIGN_MODEL.to_string(),
            compute_type: ComputeType::default(),
        }
    }
}

/// 目录布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// 程序所在目录（回退搜索位置）
    pub base_dir: PathBuf,
    /// 输入视频目录
    pub videos_dir: PathBuf,
    /// 结果根目录，每个视频一个子目录
    pub results_dir: PathBuf,
    /// 识别的扩展名，不含点
    pub extensions: Vec<String>,
}

impl Layout {
    /// 以 `base_dir` 为根的默认布局
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Layout {
            videos_dir: base_dir.join(VIDEOS_DIR_NAME),
            results_dir: base_dir.join(RESULTS_DIR_NAME),
            base_dir,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_videos_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.videos_dir = dir.into();
        self
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// 设置扩展名（逗号分隔，允许带前导点）
    pub fn with_extensions(mut self, list: &str) -> Self {
        let exts: Vec<String> = list
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !exts.is_empty() {
            self.extensions = exts;
        }
        self
    }

    /// 单个视频的输出目录: `<results>/<文件名去扩展名>/`
    pub fn output_dir_for(&self, input: &InputFile) -> PathBuf {
        self.results_dir.join(&input.stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tool_contract() {
        let cfg = TranscribeConfig::default();
        assert_eq!(cfg.executable, "whisperx");
        assert_eq!(cfg.model, "medium");
        assert_eq!(cfg.device.as_str(), "cpu");
        assert_eq!(cfg.align_model, "WAV2VEC2_ASR_BASE_960H");
        assert_eq!(cfg.compute_type.as_str(), "int8");
    }

    #[test]
    fn test_layout_paths() {
        let layout = Layout::new("/opt/wx");
        assert_eq!(layout.videos_dir, PathBuf::from("/opt/wx/videos"));
        assert_eq!(layout.results_dir, PathBuf::from("/opt/wx/whisperx_results"));
        assert_eq!(layout.extensions, vec!["mp4", "avi", "mov", "mkv", "webm"]);

        let input = InputFile::new("/opt/wx/videos/lecture 1.mp4");
        assert_eq!(
            layout.output_dir_for(&input),
            PathBuf::from("/opt/wx/whisperx_results/lecture 1")
        );
    }

    #[test]
    fn test_with_extensions() {
        let layout = Layout::new("/tmp").with_extensions(".mp4, MKV,,");
        assert_eq!(layout.extensions, vec!["mp4", "MKV"]);

        let layout = Layout::new("/tmp").with_extensions(" , ");
        assert_eq!(layout.extensions.len(), DEFAULT_EXTENSIONS.len());
    }
}
