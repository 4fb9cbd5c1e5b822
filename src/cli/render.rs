//! # render 子命令 CLI 定义
//!
//! 渲染单个作业文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/render.rs`

use super::RenderOverrides;
use clap::Args;
use std::path::PathBuf;

/// render 子命令参数
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the TOML job file
    pub job_file: PathBuf,

    /// Batch system: pbs, slurm, bare or autodetect (default: job file, then autodetect)
    #[arg(short, long, env = "JOBGEN_BATCH_SYSTEM")]
    pub batch_system: Option<String>,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}
