//! # 统一错误处理模块
//!
//! 定义 jobgen 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 模板替换失败的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSegment {
    /// 调度器指令头
    Header,
    /// 任务启动行
    TaskLine,
}

impl std::fmt::Display for TemplateSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSegment::Header => write!(f, "header"),
            TemplateSegment::TaskLine => write!(f, "task line"),
        }
    }
}

/// jobgen 统一错误类型
#[derive(Error, Debug)]
pub enum JobgenError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 作业文件错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse job file: {path}")]
    JobFileParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid walltime: '{0}'")]
    InvalidWalltime(String),

    #[error("Job '{name}' has no executable")]
    MissingExecutable { name: String },

    // ─────────────────────────────────────────────────────────────
    // 生成错误
    // ─────────────────────────────────────────────────────────────
    #[error("Batch system '{requested}' is not supported (expected pbs, slurm, bare or autodetect)")]
    UnsupportedBatchSystem { requested: String },

    #[error("No batch system detected: neither {pbs_tool} nor {slurm_tool} is on PATH and the bare fallback is disabled")]
    NoBatchSystemDetected {
        pbs_tool: &'static str,
        slurm_tool: &'static str,
    },

    #[error("Failed to substitute {segment} template: {reason}")]
    Template {
        segment: TemplateSegment,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("Output '{path}' is already produced by another job file in this batch")]
    OutputConflict { path: String },

    #[error("{failed} of {total} job file(s) failed to render")]
    BatchFailed { failed: usize, total: usize },
}

impl JobgenError {
    /// 展开完整的错误链（含 source）
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        message
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, JobgenError>;
