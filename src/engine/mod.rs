//! # 脚本生成引擎
//!
//! 将作业描述渲染为批处理脚本。纯函数，不做任何 I/O。
//!
//! ## 流程
//! ```text
//! JobSpec ──> DerivedFields ──> 指令头 (按批处理系统分派)
//!                          └──> 命令体 ──> 完整脚本
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/`, `utils/detect.rs`
//! - 子模块: duration, template, header, command

pub mod command;
pub mod duration;
pub mod header;
pub mod template;

use crate::error::{JobgenError, Result};
use crate::models::{BatchSystemKind, DerivedFields, JobSpec, RenderOptions};
use crate::utils::detect::{ExecutableProbe, PBS_SUBMIT_TOOL, SLURM_SUBMIT_TOOL};

use template::TemplateContext;

/// 解析批处理系统请求
///
/// 显式类型原样返回，不会触发探测；`Autodetect` 依次探测 PBS 和 Slurm，
/// 都不存在时按 `bare_fallback` 退回 `Bare`，否则报错。
pub fn resolve_batch_system(
    request: &BatchSystemKind,
    options: &RenderOptions,
    probe: &dyn ExecutableProbe,
) -> Result<BatchSystemKind> {
    match request {
        BatchSystemKind::Autodetect => {
            if probe.is_available(PBS_SUBMIT_TOOL) {
                Ok(BatchSystemKind::Pbs)
            } else if probe.is_available(SLURM_SUBMIT_TOOL) {
                Ok(BatchSystemKind::Slurm)
            } else if options.bare_fallback {
                Ok(BatchSystemKind::Bare)
            } else {
                Err(JobgenError::NoBatchSystemDetected {
                    pbs_tool: PBS_SUBMIT_TOOL,
                    slurm_tool: SLURM_SUBMIT_TOOL,
                })
            }
        }
        other => Ok(other.clone()),
    }
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedScript {
    /// 实际使用的批处理系统
    pub batch_system: BatchSystemKind,
    pub text: String,
}

/// 渲染完整脚本
///
/// 失败时不产生任何输出。
pub fn render_script(
    job: &JobSpec,
    request: &BatchSystemKind,
    options: &RenderOptions,
    probe: &dyn ExecutableProbe,
) -> Result<RenderedScript> {
    let batch_system = resolve_batch_system(request, options, probe)?;
    let text = render_resolved(job, &batch_system, options)?;
    Ok(RenderedScript { batch_system, text })
}

/// 使用已解析的批处理系统渲染
pub fn render_resolved(
    job: &JobSpec,
    kind: &BatchSystemKind,
    options: &RenderOptions,
) -> Result<String> {
    if !kind.is_concrete() {
        return Err(JobgenError::UnsupportedBatchSystem {
            requested: kind.to_string(),
        });
    }
    if job.executable.trim().is_empty() {
        return Err(JobgenError::MissingExecutable {
            name: job.name.clone(),
        });
    }

    let derived = DerivedFields::compute(job, options.log_layout);
    let context = TemplateContext::new(job, &derived);

    let mut script = header::render_header(job, &derived, kind, options, &context)?;
    script.push_str(&command::render_body(job, kind, options, &context)?);
    Ok(script)
}
