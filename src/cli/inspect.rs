//! # inspect 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use clap::Args;
use std::path::PathBuf;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the TOML job file
    pub job_file: PathBuf,

    /// Batch system used to decide whether the MPI launcher applies
    #[arg(short, long, env = "JOBGEN_BATCH_SYSTEM")]
    pub batch_system: Option<String>,

    #[command(flatten)]
    pub overrides: super::RenderOverrides,
}
