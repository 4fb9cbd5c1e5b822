//! # 派生字段
//!
//! 从作业描述计算出的、输入中没有直接保存的值。每次渲染重新计算。
//!
//! ## 依赖关系
//! - 被 `engine/` 使用
//! - 使用 `engine/duration.rs` 格式化 walltime

use super::job::JobSpec;
use super::options::LogLayout;
use crate::engine::duration::format_duration;

/// 派生字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedFields {
    /// 总 MPI 进程数 = 节点数 × 每节点进程数
    pub total_ranks: u64,
    /// 每节点任务数：每个 rank 一个任务，非 MPI 作业为 1
    pub tasks_per_node: u32,
    /// `HH:MM:SS`
    pub walltime_text: String,
    pub output_file: String,
    pub error_file: String,
}

impl DerivedFields {
    pub fn compute(job: &JobSpec, layout: LogLayout) -> Self {
        DerivedFields {
            total_ranks: u64::from(job.node_count) * u64::from(job.ranks_per_node),
            tasks_per_node: job.ranks_per_node.max(1),
            walltime_text: format_duration(job.walltime),
            output_file: log_file(&job.log_directory, &job.name, "out", layout),
            error_file: log_file(&job.log_directory, &job.name, "err", layout),
        }
    }
}

/// 拼接日志文件路径（纯文本，不访问文件系统）
fn log_file(directory: &str, name: &str, suffix: &str, layout: LogLayout) -> String {
    let file_name = format!("{}.{}", name, suffix);
    let relative = match layout {
        LogLayout::Flat => file_name,
        LogLayout::Nested => join_path(name, &file_name),
    };
    join_path(directory, &relative)
}

fn join_path(base: &str, tail: &str) -> String {
    if base.is_empty() {
        return tail.to_string();
    }
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        // 根目录
        return format!("/{}", tail);
    }
    format!("{}/{}", base, tail)
}
