//! # 批处理系统类型
//!
//! 封闭枚举：PBS / Slurm / Bare / Autodetect / Unsupported。
//!
//! ## 依赖关系
//! - 被 `engine/mod.rs` 解析与分派
//! - 被 `commands/` 使用

use std::fmt;

/// 批处理系统
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSystemKind {
    Pbs,
    Slurm,
    /// 不带调度器指令的普通 shell 脚本
    Bare,
    /// 渲染前通过探测主机确定
    Autodetect,
    /// 无法识别的标识符（保留原文用于报错）
    Unsupported(String),
}

impl BatchSystemKind {
    /// 解析标识符；未知标识符得到 `Unsupported`
    pub fn parse(identifier: &str) -> Self {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "pbs" => BatchSystemKind::Pbs,
            "slurm" => BatchSystemKind::Slurm,
            "bare" => BatchSystemKind::Bare,
            "autodetect" => BatchSystemKind::Autodetect,
            _ => BatchSystemKind::Unsupported(identifier.to_string()),
        }
    }

    /// 是否为可直接渲染的具体类型
    pub fn is_concrete(&self) -> bool {
        matches!(
            self,
            BatchSystemKind::Pbs | BatchSystemKind::Slurm | BatchSystemKind::Bare
        )
    }

    /// 是否为带指令头的调度器
    pub fn is_scheduler(&self) -> bool {
        matches!(self, BatchSystemKind::Pbs | BatchSystemKind::Slurm)
    }

    /// 输出脚本的扩展名
    pub fn script_extension(&self) -> &'static str {
        match self {
            BatchSystemKind::Pbs => "pbs",
            BatchSystemKind::Slurm => "slurm",
            _ => "sh",
        }
    }
}

impl fmt::Display for BatchSystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchSystemKind::Pbs => write!(f, "pbs"),
            BatchSystemKind::Slurm => write!(f, "slurm"),
            BatchSystemKind::Bare => write!(f, "bare"),
            BatchSystemKind::Autodetect => write!(f, "autodetect"),
            BatchSystemKind::Unsupported(name) => write!(f, "{}", name),
        }
    }
}
