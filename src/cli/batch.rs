//! # batch 子命令 CLI 定义
//!
//! 批量渲染作业文件 (*.toml -> *.pbs / *.slurm / *.sh)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::RenderOverrides;
use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input job file or directory containing job files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for generated scripts
    #[arg(short, long)]
    pub output: PathBuf,

    /// Glob pattern(s) for job files, comma-separated
    #[arg(short, long, default_value = "*.toml")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Batch system: pbs, slurm, bare or autodetect (default: each job file, then autodetect)
    #[arg(short, long, env = "JOBGEN_BATCH_SYSTEM")]
    pub batch_system: Option<String>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing scripts
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Hide the progress bar
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}
