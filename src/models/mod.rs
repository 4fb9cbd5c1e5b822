//! # 数据模型模块
//!
//! 定义作业描述、派生字段、批处理系统类型和渲染选项。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `engine/` 和 `commands/` 使用
//! - 子模块: job, derived, batch_system, options

pub mod batch_system;
pub mod derived;
pub mod job;
pub mod options;

pub use batch_system::BatchSystemKind;
pub use derived::DerivedFields;
pub use job::JobSpec;
pub use options::{LauncherFlavor, LogLayout, RenderOptions};
