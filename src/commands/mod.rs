//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `engine/`, `utils/`
//! - 子模块: render, batch, inspect, detect

pub mod batch;
pub mod detect;
pub mod inspect;
pub mod render;

use crate::cli::{Commands, RenderOverrides};
use crate::error::Result;
use crate::models::{BatchSystemKind, JobSpec, RenderOptions};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Render(args) => render::execute(args),
        Commands::Batch(args) => batch::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Detect => detect::execute(),
    }
}

/// 批处理系统请求：命令行 > 作业文件 > 自动检测
pub(crate) fn batch_request(cli: Option<&str>, job: &JobSpec) -> BatchSystemKind {
    cli.or(job.render.batch_system.as_deref())
        .map(BatchSystemKind::parse)
        .unwrap_or(BatchSystemKind::Autodetect)
}

/// 作业文件选项加命令行覆盖
pub(crate) fn effective_options(job: &JobSpec, overrides: &RenderOverrides) -> RenderOptions {
    let mut options = job.render.clone();
    overrides.apply(&mut options);
    options
}
