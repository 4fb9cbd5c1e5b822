//! # 作业描述数据模型
//!
//! 从 TOML 作业文件加载的完整作业描述。加载后只读。
//!
//! ## 依赖关系
//! - 被 `parsers/job_file.rs` 构造
//! - 被 `engine/` 和 `commands/` 使用
//! - 使用 `parsers/walltime.rs` 反序列化 walltime

use super::options::RenderOptions;
use crate::parsers::walltime;

use serde::Deserialize;
use std::time::Duration;

/// 作业描述
///
/// 字段名使用 snake_case，同时接受旧版 CamelCase 键名。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    /// 作业名，用于日志文件名和调度器作业名
    #[serde(alias = "Name")]
    pub name: String,

    /// 节点数
    #[serde(default, alias = "NumberOfNodes")]
    pub node_count: u32,

    /// 每节点 MPI 进程数
    #[serde(default, alias = "NumberOfMPIRanksPerNode")]
    pub ranks_per_node: u32,

    /// 每进程 OpenMP 线程数
    #[serde(default, alias = "NumberOfOMPThreadsPerProcess")]
    pub threads_per_process: u32,

    /// 调度器节点类型标签（可为空）
    #[serde(default, alias = "NodeType")]
    pub node_type: String,

    /// 运行时限，零表示 `00:00:00`
    #[serde(
        default,
        alias = "Walltime",
        deserialize_with = "walltime::deserialize_walltime"
    )]
    pub walltime: Duration,

    #[serde(default, alias = "Email")]
    pub email: String,

    #[serde(default, alias = "LogDirectory")]
    pub log_directory: String,

    #[serde(default, alias = "WorkingDirectory")]
    pub working_directory: String,

    /// 可执行程序（渲染前必须非空）
    #[serde(default, alias = "EntryPoint")]
    pub executable: String,

    #[serde(default)]
    pub module_pre_script: Vec<String>,

    #[serde(default, alias = "LoadModules")]
    pub load_modules: Vec<String>,

    #[serde(default, alias = "PreScript")]
    pub pre_script: Vec<String>,

    /// 插在启动器之后、可执行程序之前的前缀（profiler、容器等）
    #[serde(default)]
    pub runtime_prefix: Vec<String>,

    #[serde(default)]
    pub arguments: Vec<String>,

    #[serde(default, alias = "PostScript")]
    pub post_script: Vec<String>,

    #[serde(default, alias = "PrintOMPEnvironment")]
    pub print_omp_environment: bool,

    /// 追加在固定指令之后的原始指令行（仅 PBS/Slurm）
    #[serde(default)]
    pub extra_directives: Vec<String>,

    /// 渲染选项（`[render]` 表）
    #[serde(default)]
    pub render: RenderOptions,
}

impl JobSpec {
    /// 是否请求了 MPI 布局
    pub fn uses_mpi(&self) -> bool {
        self.ranks_per_node > 0
    }
}
