//! # 指令头渲染
//!
//! 生成调度器相关的脚本头：PBS `#PBS`、Slurm `#SBATCH` 或仅 shebang。
//! 指令顺序和前缀是调度器按文本解析的契约，空值和零值也原样输出。
//!
//! ## 依赖关系
//! - 被 `engine/mod.rs` 调用
//! - 使用 `engine/template.rs` 展开附加指令

use super::template::TemplateContext;
use crate::error::{JobgenError, Result, TemplateSegment};
use crate::models::{BatchSystemKind, DerivedFields, JobSpec, RenderOptions};

/// 渲染脚本头，以空行结尾
pub fn render_header(
    job: &JobSpec,
    derived: &DerivedFields,
    kind: &BatchSystemKind,
    options: &RenderOptions,
    context: &TemplateContext,
) -> Result<String> {
    let mut lines = vec![format!("#!{}", options.shell)];

    match kind {
        BatchSystemKind::Pbs => lines.extend(pbs_directives(job, derived, options)),
        BatchSystemKind::Slurm => lines.extend(slurm_directives(job, derived, options)),
        BatchSystemKind::Bare => {}
        other => {
            return Err(JobgenError::UnsupportedBatchSystem {
                requested: other.to_string(),
            })
        }
    }

    if kind.is_scheduler() {
        for directive in &job.extra_directives {
            lines.push(context.substitute(directive, TemplateSegment::Header)?);
        }
    }

    let mut header = lines.join("\n");
    header.push_str("\n\n");
    Ok(header)
}

fn pbs_directives(job: &JobSpec, derived: &DerivedFields, options: &RenderOptions) -> Vec<String> {
    let mut lines = vec![
        format!("#PBS -N {}", job.name),
        format!("#PBS -e {}", derived.error_file),
        format!("#PBS -o {}", derived.output_file),
    ];
    if options.mail {
        lines.push("#PBS -m abe".to_string());
        lines.push(format!("#PBS -M {}", job.email));
    }
    lines.push(format!(
        "#PBS -l select={}:node_type={}:mpiprocs={}:ompthreads={}",
        job.node_count, job.node_type, job.ranks_per_node, job.threads_per_process
    ));
    lines.push(format!("#PBS -l walltime={}", derived.walltime_text));
    lines
}

fn slurm_directives(
    job: &JobSpec,
    derived: &DerivedFields,
    options: &RenderOptions,
) -> Vec<String> {
    let mut lines = vec![
        format!("#SBATCH --job-name={}", job.name),
        format!("#SBATCH --output={}", derived.output_file),
        format!("#SBATCH --error={}", derived.error_file),
    ];
    if options.mail {
        lines.push("#SBATCH --mail-type=ALL".to_string());
        lines.push(format!("#SBATCH --mail-user={}", job.email));
    }
    lines.push(format!("#SBATCH --nodes={}", job.node_count));
    lines.push(format!("#SBATCH --ntasks-per-node={}", derived.tasks_per_node));
    lines.push(format!("#SBATCH --time={}", derived.walltime_text));
    lines
}
