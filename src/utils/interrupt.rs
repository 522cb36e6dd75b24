//! # Ctrl-C 中断处理
//!
//! 用共享标志代替默认的 SIGINT 终止行为：批量执行器在文件之间检查标志，
//! 外部工具运行期间由 `tool.rs` 轮询并终止子进程。第二次 Ctrl-C 直接退出；
//! 处理结束后（等待按键时）第一次 Ctrl-C 就退出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 安装
//! - 被 `batch/runner.rs`, `tool.rs` 检查
//! - 使用 `ctrlc` crate

use crate::error::Result;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 被中断时的进程退出码 (128 + SIGINT)
pub const EXIT_INTERRUPTED: i32 = 130;

/// 可克隆的中断标志
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    set: Arc<AtomicBool>,
    /// 已无可取消的工作，信号到达即退出
    exit_on_signal: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 安装进程级 Ctrl-C 处理器并返回对应标志（每个进程只能调用一次）
    pub fn install() -> Result<Self> {
        let flag = Self::new();
        let handler_flag = flag.clone();

        // 处理器运行在独立线程，只做原子操作
        ctrlc::set_handler(move || {
            if handler_flag.on_signal() {
                std::process::exit(EXIT_INTERRUPTED);
            }
        })?;

        Ok(flag)
    }

    /// 记录一次 Ctrl-C，返回进程是否应当立即退出
    fn on_signal(&self) -> bool {
        let already_set = self.set.swap(true, Ordering::SeqCst);
        already_set || self.exit_on_signal.load(Ordering::SeqCst)
    }

    /// 之后的任何 Ctrl-C 都直接退出
    pub fn exit_on_signal(&self) {
        self.exit_on_signal.store(true, Ordering::SeqCst);
    }

    /// 手动触发中断
    pub fn trigger(&self) {
        self.set.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::SeqCst)
    }
}
