//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `render`: 渲染单个作业文件
//! - `batch`: 批量渲染目录下的作业文件
//! - `inspect`: 显示作业字段与派生字段
//! - `detect`: 显示自动检测到的批处理系统
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: render, batch, inspect

pub mod batch;
pub mod inspect;
pub mod render;

use crate::models::{LauncherFlavor, LogLayout, RenderOptions};

use clap::{Args, Parser, Subcommand};

/// jobgen - 批处理脚本生成器
#[derive(Parser)]
#[command(name = "jobgen")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Generate PBS / Slurm / plain shell batch scripts from one job description", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Render one job file into a batch script
    Render(render::RenderArgs),

    /// Render every job file under a directory
    Batch(batch::BatchArgs),

    /// Show job fields and the values derived from them
    Inspect(inspect::InspectArgs),

    /// Print the batch system autodetection would choose on this host
    Detect,
}

/// 覆盖作业文件 `[render]` 表的选项
#[derive(Args, Debug, Default, Clone)]
pub struct RenderOverrides {
    /// MPI launcher flags
    #[arg(long, value_enum)]
    pub launcher: Option<LauncherFlavor>,

    /// Log file layout
    #[arg(long, value_enum)]
    pub log_layout: Option<LogLayout>,

    /// Do not emit mail directives
    #[arg(long, default_value_t = false)]
    pub no_mail: bool,

    /// Do not prefix the launcher with `time`
    #[arg(long, default_value_t = false)]
    pub no_time: bool,

    /// Use the MPI launcher in bare scripts too
    #[arg(long, default_value_t = false)]
    pub mpi_in_bare: bool,

    /// Fail instead of falling back to a bare script when no scheduler is detected
    #[arg(long, default_value_t = false)]
    pub no_bare_fallback: bool,

    /// Interpreter for the shebang line (e.g. '/bin/bash -l')
    #[arg(long)]
    pub shell: Option<String>,
}

impl RenderOverrides {
    /// 在作业文件选项之上应用命令行覆盖
    pub fn apply(&self, options: &mut RenderOptions) {
        if let Some(launcher) = self.launcher {
            options.launcher = launcher;
        }
        if let Some(layout) = self.log_layout {
            options.log_layout = layout;
        }
        if self.no_mail {
            options.mail = false;
        }
        if self.no_time {
            options.time_launch = false;
        }
        if self.mpi_in_bare {
            options.mpi_in_bare = true;
        }
        if self.no_bare_fallback {
            options.bare_fallback = false;
        }
        if let Some(shell) = &self.shell {
            options.shell = shell.clone();
        }
    }
}
