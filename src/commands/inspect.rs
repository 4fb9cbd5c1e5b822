//! # inspect 命令实现
//!
//! 以表格显示作业字段、派生字段和最终任务启动行。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `parsers/`, `models/`, `engine/`
//! - 使用 `tabled` 输出表格

use super::{batch_request, effective_options};
use crate::cli::inspect::InspectArgs;
use crate::engine::{self, command, template::TemplateContext};
use crate::error::{JobgenError, Result};
use crate::models::{BatchSystemKind, DerivedFields, JobSpec, RenderOptions};
use crate::parsers;
use crate::utils::detect::PathProbe;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 表格行
#[derive(Debug, Clone, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl FieldRow {
    fn new(field: &str, value: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    let job = parsers::load_job_file(&args.job_file)?;
    let options = effective_options(&job, &args.overrides);
    let request = batch_request(args.batch_system.as_deref(), &job);
    let kind = engine::resolve_batch_system(&request, &options, &PathProbe)?;

    output::print_header(&format!("Job '{}'", job.name));

    let rows = inspection_rows(&job, &kind, &options)?;
    println!("{}", Table::new(&rows));

    Ok(())
}

fn inspection_rows(
    job: &JobSpec,
    kind: &BatchSystemKind,
    options: &RenderOptions,
) -> Result<Vec<FieldRow>> {
    if !kind.is_concrete() {
        return Err(JobgenError::UnsupportedBatchSystem {
            requested: kind.to_string(),
        });
    }

    let derived = DerivedFields::compute(job, options.log_layout);
    let context = TemplateContext::new(job, &derived);

    let mut rows = vec![
        FieldRow::new("Batch system", kind),
        FieldRow::new("Nodes", job.node_count),
        FieldRow::new("Node type", &job.node_type),
        FieldRow::new("Ranks per node", job.ranks_per_node),
        FieldRow::new("Threads per process", job.threads_per_process),
        FieldRow::new("Total ranks", derived.total_ranks),
        FieldRow::new("Tasks per node", derived.tasks_per_node),
        FieldRow::new("Walltime", &derived.walltime_text),
        FieldRow::new("Output file", &derived.output_file),
        FieldRow::new("Error file", &derived.error_file),
        FieldRow::new("Modules", job.load_modules.join(", ")),
        FieldRow::new(
            "MPI launcher",
            if command::launcher_applies(job, kind, options) {
                options.launcher.to_string()
            } else {
                "none".to_string()
            },
        ),
    ];

    if !job.executable.is_empty() {
        rows.push(FieldRow::new(
            "Task line",
            command::task_line(job, kind, options, &context)?,
        ));
    }

    Ok(rows)
}
