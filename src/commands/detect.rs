//! # detect 命令实现
//!
//! 显示本机可用的调度器工具以及自动检测结果。
//!
//! ## 依赖关系
//! - 使用 `engine/`, `utils/detect.rs`, `utils/output.rs`

use crate::engine;
use crate::error::Result;
use crate::models::{BatchSystemKind, RenderOptions};
use crate::utils::detect::{ExecutableProbe, PathProbe, PBS_SUBMIT_TOOL, SLURM_SUBMIT_TOOL};
use crate::utils::output;

/// 执行 detect 命令
pub fn execute() -> Result<()> {
    for tool in [PBS_SUBMIT_TOOL, SLURM_SUBMIT_TOOL] {
        if PathProbe.is_available(tool) {
            output::print_success(&format!("'{}' found on PATH", tool));
        } else {
            output::print_skip(&format!("'{}' not found on PATH", tool));
        }
    }

    let kind = engine::resolve_batch_system(
        &BatchSystemKind::Autodetect,
        &RenderOptions::default(),
        &PathProbe,
    )?;
    println!("{}", kind);
    Ok(())
}
