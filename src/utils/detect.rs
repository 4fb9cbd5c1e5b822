//! # 批处理系统探测
//!
//! 检查调度器提交工具是否在 PATH 中。只读查询，无副作用。
//!
//! ## 依赖关系
//! - 被 `engine/mod.rs` 通过 `ExecutableProbe` trait 调用
//! - 使用 `which` crate

/// PBS 提交工具
pub const PBS_SUBMIT_TOOL: &str = "qsub";
/// Slurm 提交工具
pub const SLURM_SUBMIT_TOOL: &str = "sbatch";

/// "程序 X 是否在搜索路径上？"
pub trait ExecutableProbe {
    fn is_available(&self, program: &str) -> bool;
}

/// 基于 PATH 的探测
#[derive(Debug, Default, Clone, Copy)]
pub struct PathProbe;

impl ExecutableProbe for PathProbe {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
