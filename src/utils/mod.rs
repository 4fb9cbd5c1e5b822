//! # 工具函数模块
//!
//! 提供美化输出、进度条、批处理系统探测等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `engine/` 模块使用
//! - 子模块: detect, output, progress

pub mod detect;
pub mod output;
pub mod progress;
