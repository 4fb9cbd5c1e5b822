//! # 渲染选项
//!
//! 控制脚本生成引擎的可选行为：MPI 启动参数、日志路径布局、邮件指令等。
//! 可以写在作业文件的 `[render]` 表中，也可以被命令行参数覆盖。
//!
//! ## 依赖关系
//! - 被 `models/job.rs` 嵌入
//! - 被 `engine/` 和 `cli/` 使用

use clap::ValueEnum;
use serde::Deserialize;

/// MPI 启动器参数风格
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LauncherFlavor {
    /// mpirun with OpenMP thread, placement and binding flags
    #[default]
    #[serde(alias = "open-mp")]
    Openmp,
    /// mpirun with the rank count only
    Plain,
}

impl std::fmt::Display for LauncherFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LauncherFlavor::Openmp => write!(f, "openmp"),
            LauncherFlavor::Plain => write!(f, "plain"),
        }
    }
}

/// 日志文件路径布局
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLayout {
    /// <log_directory>/<name>.out
    #[default]
    Flat,
    /// <log_directory>/<name>/<name>.out
    Nested,
}

impl std::fmt::Display for LogLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLayout::Flat => write!(f, "flat"),
            LogLayout::Nested => write!(f, "nested"),
        }
    }
}

/// 渲染选项
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// 命令行未指定时使用的批处理系统
    pub batch_system: Option<String>,

    pub launcher: LauncherFlavor,

    /// 在启动器前加 `time`
    pub time_launch: bool,

    pub log_layout: LogLayout,

    /// 输出邮件通知指令
    pub mail: bool,

    /// bare 脚本也使用 MPI 启动器
    pub mpi_in_bare: bool,

    /// 自动检测失败时退回 bare 脚本
    pub bare_fallback: bool,

    /// shebang 中的解释器
    pub shell: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            batch_system: None,
            launcher: LauncherFlavor::Openmp,
            time_launch: true,
            log_layout: LogLayout::Flat,
            mail: true,
            mpi_in_bare: false,
            bare_fallback: true,
            shell: "/bin/bash -l".to_string(),
        }
    }
}
