//! # WhisperX 外部工具封装
//!
//! 转录本身完全由外部可执行文件完成，这里只负责命令行契约：
//!
//! ```text
//! <tool> <input> --model <size> --output_dir <dir> --device <cpu|cuda>
//!        --align_model <name> --compute_type <int8|float32>
//! ```
//!
//! 成功与否只看退出码，失败原因取捕获的 stderr。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/config.rs` 的 TranscribeConfig
//! - 使用 `utils/interrupt.rs` 在中断时终止子进程

use crate::error::{Result, WxError};
use crate::models::TranscribeConfig;
use crate::utils::InterruptFlag;

use std::ffi::OsString;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 安装提示
pub const INSTALL_HINT: &str = "pip install git+https://github.com/m-bain/whisperX.git";

/// 子进程轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 一次成功调用的捕获输出
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// WhisperX 命令行封装
#[derive(Debug, Clone)]
pub struct WhisperX {
    config: TranscribeConfig,
}

impl WhisperX {
    pub fn new(config: TranscribeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranscribeConfig {
        &self.config
    }

    pub fn executable(&self) -> &str {
        &self.config.executable
    }

    /// 可用性检查：运行 `<tool> --help`，返回帮助输出的第一行
    ///
    /// 子进程与本进程同组，Ctrl-C 也会让它失败；此时报告中断而不是工具不可用。
    pub fn check_available(&self, interrupt: &InterruptFlag) -> Result<String> {
        let exe = self.executable();
        debug!(executable = exe, "checking tool availability");

        let out = Command::new(exe)
            .arg("--help")
            .stdin(Stdio::null())
            .output();
        if interrupt.is_set() {
            return Err(WxError::Interrupted {
                completed: 0,
                total: 0,
            });
        }

        let out = out.map_err(|e| WxError::ToolUnavailable {
            command: exe.to_string(),
            reason: if e.kind() == ErrorKind::NotFound {
                "executable not found".to_string()
            } else {
                e.to_string()
            },
        })?;

        if !out.status.success() {
            return Err(WxError::ToolUnavailable {
                command: exe.to_string(),
                reason: format!("`{} --help` {}", exe, out.status),
            });
        }

        let first_line = String::from_utf8_lossy(&out.stdout)
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string();

        Ok(first_line)
    }

    /// 单个视频的完整参数列表
    pub fn args_for(&self, input: &Path, output_dir: &Path) -> Vec<OsString> {
        vec![
            input.as_os_str().to_os_string(),
            "--model".into(),
            self.config.model.clone().into(),
            "--output_dir".into(),
            output_dir.as_os_str().to_os_string(),
            "--device".into(),
            self.config.device.as_str().into(),
            "--align_model".into(),
            self.config.align_model.clone().into(),
            "--compute_type".into(),
            self.config.compute_type.as_str().into(),
        ]
    }

    /// 可打印的命令行（仅用于显示，含空格的参数加引号）
    pub fn display_command(&self, input: &Path, output_dir: &Path) -> String {
        std::iter::once(OsString::from(self.executable()))
            .chain(self.args_for(input, output_dir))
            .map(|a| {
                let s = a.to_string_lossy().to_string();
                if s.contains(char::is_whitespace) {
                    format!("\"{}\"", s)
                } else {
                    s
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 转录单个视频
    ///
    /// 阻塞直到子进程结束，stdout/stderr 完整缓冲。中断标志被设置时终止子进程
    /// 并返回 `ToolKilled`。非零退出码返回 `ToolFailed`，携带 stderr 文本。
    pub fn transcribe(
        &self,
        input: &Path,
        output_dir: &Path,
        interrupt: &InterruptFlag,
    ) -> Result<ToolOutput> {
        let exe = self.executable();
        debug!(command = %self.display_command(input, output_dir), "launching");

        let started = Instant::now();
        let mut command = Command::new(exe);
        command
            .args(self.args_for(input, output_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // 独立进程组，中断时连同工具派生的子进程一起终止
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|e| WxError::ToolLaunch {
            command: exe.to_string(),
            source: e,
        })?;

        // 管道必须并行读空，否则子进程写满缓冲区后会阻塞
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    terminate(&mut child);
                    return Err(WxError::ToolLaunch {
                        command: exe.to_string(),
                        source: e,
                    });
                }
            }

            // 读取线程不再 join：残留的孙进程可能仍持有管道
            if interrupt.is_set() {
                warn!(pid = child.id(), "interrupt received, terminating {}", exe);
                terminate(&mut child);
                return Err(WxError::ToolKilled {
                    command: exe.to_string(),
                });
            }

            thread::sleep(POLL_INTERVAL);
        };

        let output = ToolOutput {
            status,
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        };

        debug!(
            %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "{} finished",
            exe
        );

        if !status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(WxError::ToolFailed {
                command: exe.to_string(),
                status: status.to_string(),
                stderr: if stderr.is_empty() {
                    "(no error output)".to_string()
                } else {
                    stderr
                },
            });
        }

        Ok(output)
    }
}

/// 终止子进程（unix 下连同整个进程组）并回收
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        // process_group(0) 使子进程成为组长，组 ID 即其 pid
        let pgid = child.id() as libc::pid_t;
        // SAFETY: killpg 只发送信号，不涉及内存
        unsafe {
            libc::killpg(pgid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// 在后台线程中读空管道
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}
