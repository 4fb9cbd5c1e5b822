//! # 解析器模块
//!
//! 读取 TOML 作业文件并解析 walltime。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 构造 `models/` 数据模型
//! - 子模块: job_file, walltime

pub mod job_file;
pub mod walltime;

pub use job_file::load_job_file;
