//! # 命令体组装
//!
//! 按固定顺序组装脚本主体，非空分组之间以空行分隔：
//! 1. module 预脚本
//! 2. `module load` 行
//! 3. 通用预脚本
//! 4. `cd <working_directory>`
//! 5. 任务启动行
//! 6. 后脚本
//!
//! ## 依赖关系
//! - 被 `engine/mod.rs` 调用
//! - 使用 `engine/template.rs` 展开任务启动行

use super::template::TemplateContext;
use crate::error::{Result, TemplateSegment};
use crate::models::{BatchSystemKind, JobSpec, LauncherFlavor, RenderOptions};

/// 组装脚本主体
pub fn render_body(
    job: &JobSpec,
    kind: &BatchSystemKind,
    options: &RenderOptions,
    context: &TemplateContext,
) -> Result<String> {
    let mut task = Vec::new();
    if job.print_omp_environment {
        task.push("export OMP_DISPLAY_ENV=true".to_string());
    }
    task.push(task_line(job, kind, options, context)?);

    let cd = if job.working_directory.is_empty() {
        vec![]
    } else {
        vec![format!("cd {}", job.working_directory)]
    };

    let groups = [
        job.module_pre_script.clone(),
        job.load_modules
            .iter()
            .map(|m| format!("module load {}", m))
            .collect(),
        job.pre_script.clone(),
        cd,
        task,
        job.post_script.clone(),
    ];

    let mut body = groups
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| group.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    body.push('\n');
    Ok(body)
}

/// 是否在任务行前加 MPI 启动器
///
/// 需要 `ranks_per_node > 0`；bare 脚本仅在 `mpi_in_bare` 打开时使用启动器。
pub fn launcher_applies(job: &JobSpec, kind: &BatchSystemKind, options: &RenderOptions) -> bool {
    job.uses_mpi() && (kind.is_scheduler() || options.mpi_in_bare)
}

/// 构建并展开任务启动行
pub fn task_line(
    job: &JobSpec,
    kind: &BatchSystemKind,
    options: &RenderOptions,
    context: &TemplateContext,
) -> Result<String> {
    let mut segments = Vec::new();

    if launcher_applies(job, kind, options) {
        segments.push(launcher_template(options));
    }
    if !job.runtime_prefix.is_empty() {
        segments.push(job.runtime_prefix.join(" "));
    }
    segments.push(job.executable.clone());
    if !job.arguments.is_empty() {
        segments.push(job.arguments.join(" "));
    }

    context.substitute(&segments.join(" "), TemplateSegment::TaskLine)
}

fn launcher_template(options: &RenderOptions) -> String {
    let mpirun = match options.launcher {
        LauncherFlavor::Openmp => {
            "mpirun \
             -x OMP_NUM_THREADS={{threads_per_process}} \
             -x OMP_PLACES=cores \
             -n {{total_ranks}} \
             --map-by node:PE={{threads_per_process}} \
             --bind-to core"
        }
        LauncherFlavor::Plain => "mpirun -n {{total_ranks}}",
    };

    if options.time_launch {
        format!("time {}", mpirun)
    } else {
        mpirun.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobgenError;
    use crate::models::{DerivedFields, LogLayout};

    fn job() -> JobSpec {
        JobSpec {
            name: "run1".to_string(),
            node_count: 2,
            ranks_per_node: 4,
            threads_per_process: 2,
            executable: "./sim".to_string(),
            arguments: vec!["--fast".to_string()],
            ..Default::default()
        }
    }

    fn body(job: &JobSpec, kind: BatchSystemKind, options: &RenderOptions) -> Result<String> {
        let derived = DerivedFields::compute(job, LogLayout::Flat);
        let ctx = TemplateContext::new(job, &derived);
        render_body(job, &kind, options, &ctx)
    }

    #[test]
    fn test_openmp_launcher_line() {
        let out = body(&job(), BatchSystemKind::Pbs, &RenderOptions::default()).unwrap();
        assert_eq!(
            out,
            "time mpirun -x OMP_NUM_THREADS=2 -x OMP_PLACES=cores -n 8 \
             --map-by node:PE=2 --bind-to core ./sim --fast\n"
        );
    }

    #[test]
    fn test_plain_launcher_without_time() {
        let options = RenderOptions {
            launcher: LauncherFlavor::Plain,
            time_launch: false,
            ..Default::default()
        };
        let out = body(&job(), BatchSystemKind::Slurm, &options).unwrap();
        assert_eq!(out, "mpirun -n 8 ./sim --fast\n");
    }

    #[test]
    fn test_no_launcher_without_ranks() {
        let mut spec = job();
        spec.ranks_per_node = 0;
        for kind in [BatchSystemKind::Pbs, BatchSystemKind::Slurm, BatchSystemKind::Bare] {
            let out = body(&spec, kind, &RenderOptions::default()).unwrap();
            assert!(!out.contains("mpirun"));
            assert_eq!(out, "./sim --fast\n");
        }
    }

    #[test]
    fn test_bare_skips_launcher_unless_enabled() {
        let out = body(&job(), BatchSystemKind::Bare, &RenderOptions::default()).unwrap();
        assert_eq!(out, "./sim --fast\n");

        let options = RenderOptions {
            mpi_in_bare: true,
            launcher: LauncherFlavor::Plain,
            ..Default::default()
        };
        let out = body(&job(), BatchSystemKind::Bare, &options).unwrap();
        assert_eq!(out, "time mpirun -n 8 ./sim --fast\n");
    }

    #[test]
    fn test_runtime_prefix_and_arguments_order() {
        let mut spec = job();
        spec.runtime_prefix = vec!["nsys".to_string(), "profile".to_string()];
        spec.arguments = vec!["-i".to_string(), "input.dat".to_string()];
        let options = RenderOptions {
            launcher: LauncherFlavor::Plain,
            time_launch: false,
            ..Default::default()
        };
        let out = body(&spec, BatchSystemKind::Slurm, &options).unwrap();
        assert_eq!(out, "mpirun -n 8 nsys profile ./sim -i input.dat\n");
    }

    #[test]
    fn test_full_body_grouping() {
        let mut spec = job();
        spec.ranks_per_node = 0;
        spec.module_pre_script = vec!["module purge".to_string()];
        spec.load_modules = vec!["gcc/12".to_string(), "openmpi/4".to_string()];
        spec.pre_script = vec!["export A=1".to_string(), "echo start".to_string()];
        spec.working_directory = "/scratch/run1".to_string();
        spec.post_script = vec!["echo done".to_string()];
        let out = body(&spec, BatchSystemKind::Pbs, &RenderOptions::default()).unwrap();
        assert_eq!(
            out,
            "module purge\n\
             \n\
             module load gcc/12\n\
             module load openmpi/4\n\
             \n\
             export A=1\n\
             echo start\n\
             \n\
             cd /scratch/run1\n\
             \n\
             ./sim --fast\n\
             \n\
             echo done\n"
        );
    }

    #[test]
    fn test_cd_line_only_when_working_directory_set() {
        let spec = job();
        let out = body(&spec, BatchSystemKind::Bare, &RenderOptions::default()).unwrap();
        assert!(!out.contains("cd "));

        let mut spec = job();
        spec.working_directory = "work".to_string();
        let out = body(&spec, BatchSystemKind::Bare, &RenderOptions::default()).unwrap();
        assert_eq!(out.matches("cd work\n").count(), 1);
    }

    #[test]
    fn test_omp_environment_dump() {
        let mut spec = job();
        spec.print_omp_environment = true;
        let out = body(&spec, BatchSystemKind::Bare, &RenderOptions::default()).unwrap();
        assert_eq!(out, "export OMP_DISPLAY_ENV=true\n./sim --fast\n");
    }

    #[test]
    fn test_arguments_reference_derived_fields() {
        let mut spec = job();
        spec.arguments = vec!["--ranks={{total_ranks}}".to_string()];
        let out = body(&spec, BatchSystemKind::Bare, &RenderOptions::default()).unwrap();
        assert_eq!(out, "./sim --ranks=8\n");
    }

    #[test]
    fn test_bad_argument_template_reports_task_line() {
        let mut spec = job();
        spec.arguments = vec!["--x={{nope}}".to_string()];
        let err = body(&spec, BatchSystemKind::Bare, &RenderOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            JobgenError::Template {
                segment: TemplateSegment::TaskLine,
                ..
            }
        ));
    }
}
