//! # 退出前暂停
//!
//! 双击运行时窗口会立即关闭，所以在交互终端中结束前等待回车。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 使用 `console` crate

use console::Term;

/// 只有在有人值守的终端中且未禁用时才暂停
pub fn should_pause(no_pause: bool) -> bool {
    !no_pause && console::user_attended()
}

/// 打印提示并等待回车
pub fn wait_for_enter() {
    let term = Term::stdout();
    if term.write_line("\nPress Enter to exit...").is_ok() {
        let _ = term.read_line();
    }
}
