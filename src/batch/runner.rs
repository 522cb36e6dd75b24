//! # 批量执行器
//!
//! 逐个（严格顺序）处理视频列表。
//!
//! ## 功能
//! - 为每个视频创建独立输出目录
//! - 处理前确认输入文件仍然存在
//! - 单项错误记录为失败，不影响后续文件
//! - 文件之间检查 Ctrl-C 中断
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `utils/output.rs` 打印单项结果
//! - 使用 `utils/interrupt.rs` 检查中断

use crate::error::{Result, WxError};
use crate::models::{InputFile, ItemOutcome, ItemStatus, Layout, RunSummary};
use crate::utils::{output, InterruptFlag};

use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// 批量处理结果
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 每个已处理的输入恰好一项，顺序与输入一致
    pub outcomes: Vec<ItemOutcome>,
    /// 被 Ctrl-C 提前终止；此时 `outcomes` 只包含已完成的文件
    pub interrupted: bool,
}

impl BatchResult {
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_outcomes(&self.outcomes)
    }

    /// 中断时对应的错误，未中断时为 `None`
    pub fn interruption(&self, total: usize) -> Option<WxError> {
        self.interrupted.then(|| WxError::Interrupted {
            completed: self.outcomes.len(),
            total,
        })
    }

    /// 失败的条目
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| !o.status.is_success())
    }
}

/// 顺序批量执行器
pub struct BatchRunner<'a> {
    layout: &'a Layout,
    interrupt: InterruptFlag,
}

impl<'a> BatchRunner<'a> {
    pub fn new(layout: &'a Layout, interrupt: InterruptFlag) -> Self {
        Self { layout, interrupt }
    }

    /// 依次处理文件列表
    ///
    /// `processor` 接收输入文件和它的输出目录（已创建），返回 `Ok(())` 表示成功。
    /// 中断时停止并返回已完成的部分结果，`interrupted` 置位；被终止的那一项不记录。
    pub fn run<F>(&self, files: &[InputFile], mut processor: F) -> BatchResult
    where
        F: FnMut(&InputFile, &Path) -> Result<()>,
    {
        let total = files.len();
        let mut result = BatchResult::default();

        for (i, input) in files.iter().enumerate() {
            if self.interrupt.is_set() {
                result.interrupted = true;
                break;
            }

            let index = i + 1;
            output::print_item(index, total, &input.name);

            let output_dir = self.layout.output_dir_for(input);
            let started = Instant::now();
            let attempt = self.process_item(input, &output_dir, &mut processor);

            let status = match attempt {
                Ok(()) => {
                    output::print_success(&format!(
                        "Transcription of {} finished. See '{}'",
                        input.name,
                        output_dir.display()
                    ));
                    ItemStatus::Success
                }
                Err(_) if self.interrupt.is_set() => {
                    result.interrupted = true;
                    break;
                }
                Err(e) => {
                    let reason = e.report();
                    output::print_error(&format!("Error processing {}: {}", input.name, reason));
                    ItemStatus::Failed(reason)
                }
            };

            info!(
                file = %input.name,
                status = status.label(),
                elapsed_s = started.elapsed().as_secs_f64(),
                "item finished"
            );

            result.outcomes.push(ItemOutcome {
                index,
                input: input.clone(),
                output_dir,
                status,
            });
        }

        result
    }

    /// 单项处理：目录 → 存在性检查 → 外部调用
    fn process_item<F>(&self, input: &InputFile, output_dir: &Path, processor: &mut F) -> Result<()>
    where
        F: FnMut(&InputFile, &Path) -> Result<()>,
    {
        fs::create_dir_all(output_dir).map_err(|e| WxError::FileWriteError {
            path: output_dir.display().to_string(),
            source: e,
        })?;

        // 发现之后文件可能已被移走
        if !input.path().is_file() {
            return Err(WxError::InputMissing {
                path: input.path().display().to_string(),
            });
        }

        debug!(input = %input.path().display(), output = %output_dir.display(), "processing");
        processor(input, output_dir)
    }
}
