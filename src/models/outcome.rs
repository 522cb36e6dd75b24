//! # 处理结果数据模型
//!
//! 输入文件、单项处理结果与批次汇总。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 无外部模块依赖

use std::path::{Path, PathBuf};

/// 发现阶段得到的输入视频
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// 完整路径
    pub path: PathBuf,
    /// 文件名（含扩展名）
    pub name: String,
    /// 文件名去扩展名，用作输出子目录名
    pub stem: String,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unnamed".to_string());
        InputFile { path, name, stem }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 单项处理状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Success,
    /// 失败原因（人类可读）
    Failed(String),
}

impl ItemStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemStatus::Success)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Success => "success",
            ItemStatus::Failed(_) => "failed",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ItemStatus::Success => None,
            ItemStatus::Failed(reason) => Some(reason),
        }
    }
}

/// 单个视频的处理结果
#[derive(Debug, Clone)]
pub struct ItemOutcome {
    /// 1 起始序号，与列表打印一致
    pub index: usize,
    pub input: InputFile,
    pub output_dir: PathBuf,
    pub status: ItemStatus,
}

/// 批次汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
}

impl RunSummary {
    /// 由单项结果推导
    pub fn from_outcomes(outcomes: &[ItemOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.status.is_success()).count();
        RunSummary {
            succeeded,
            failed: outcomes.len() - succeeded,
            total: outcomes.len(),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
