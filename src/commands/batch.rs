//! # batch 命令实现
//!
//! 并行渲染目录下的所有作业文件。
//!
//! ## 功能
//! - 收集匹配的作业文件
//! - 自动检测只做一次（每个作业文件可在 `[render]` 中覆盖）
//! - 输出 `<output>/<相对输入目录的路径>.<pbs|slurm|sh>`，保留子目录结构
//! - 同一批次内两个作业文件映射到同一输出时，后到者报错
//! - 汇总成功/跳过/失败数量
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/`, `parsers/`, `engine/`
//! - 使用 `utils/output.rs`

use super::{batch_request, effective_options};
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::cli::RenderOverrides;
use crate::engine;
use crate::error::{JobgenError, Result};
use crate::models::BatchSystemKind;
use crate::parsers;
use crate::utils::detect::{ExecutableProbe, PathProbe, PBS_SUBMIT_TOOL, SLURM_SUBMIT_TOOL};
use crate::utils::output;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch Script Generation");

    if !args.input.exists() {
        return Err(JobgenError::DirectoryNotFound {
            path: args.input.display().to_string(),
        });
    }

    fs::create_dir_all(&args.output).map_err(|e| JobgenError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(JobgenError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    output::print_info(&format!("Found {} job file(s)", files.len()));

    let probe = CachedProbe::new(PathProbe);
    let settings = BatchSettings::new(
        &args.input,
        &args.output,
        args.batch_system.as_deref(),
        &args.overrides,
        args.overwrite,
    );

    let result = BatchRunner::new(args.jobs)
        .show_progress(!args.quiet)
        .run(files, |path| render_one(path, &settings, &probe));

    for (path, err) in &result.failures {
        output::print_error(&format!("{}: {}", path, err));
    }

    output::print_separator();
    output::print_done(&format!(
        "Processed {} job file(s): {} generated, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if result.failed > 0 {
        return Err(JobgenError::BatchFailed {
            failed: result.failed,
            total: result.total(),
        });
    }

    Ok(())
}

struct BatchSettings<'a> {
    input_dir: &'a Path,
    output_dir: &'a Path,
    batch_system: Option<&'a str>,
    overrides: &'a RenderOverrides,
    overwrite: bool,
    /// 本批次已占用的输出路径
    claimed: Mutex<HashSet<PathBuf>>,
}

impl<'a> BatchSettings<'a> {
    fn new(
        input_dir: &'a Path,
        output_dir: &'a Path,
        batch_system: Option<&'a str>,
        overrides: &'a RenderOverrides,
        overwrite: bool,
    ) -> Self {
        Self {
            input_dir,
            output_dir,
            batch_system,
            overrides,
            overwrite,
            claimed: Mutex::new(HashSet::new()),
        }
    }

    /// 输出路径：输入文件相对输入目录的路径，换成脚本扩展名
    fn target_for(&self, path: &Path, kind: &BatchSystemKind) -> PathBuf {
        let relative = match path.strip_prefix(self.input_dir) {
            Ok(relative) if relative.file_name().is_some() => relative.to_path_buf(),
            _ => path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("job")),
        };
        self.output_dir
            .join(relative)
            .with_extension(kind.script_extension())
    }

    /// 占用输出路径；已被本批次其他作业占用时返回 false
    fn claim(&self, target: &Path) -> bool {
        match self.claimed.lock() {
            Ok(mut claimed) => claimed.insert(target.to_path_buf()),
            Err(poisoned) => poisoned.into_inner().insert(target.to_path_buf()),
        }
    }
}

/// 渲染单个作业文件
fn render_one(
    path: &PathBuf,
    settings: &BatchSettings,
    probe: &dyn ExecutableProbe,
) -> ProcessResult {
    let label = path.display().to_string();

    let rendered = parsers::load_job_file(path).and_then(|job| {
        let options = effective_options(&job, settings.overrides);
        let request = batch_request(settings.batch_system, &job);
        engine::render_script(&job, &request, &options, probe)
    });

    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(e) => return ProcessResult::Failed(label, e.chain()),
    };

    let target = settings.target_for(path, &rendered.batch_system);

    if !settings.claim(&target) {
        let err = JobgenError::OutputConflict {
            path: target.display().to_string(),
        };
        return ProcessResult::Failed(label, err.chain());
    }

    if target.exists() && !settings.overwrite {
        return ProcessResult::Skipped(target.display().to_string());
    }

    if let Some(parent) = target.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            let err = JobgenError::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            };
            return ProcessResult::Failed(label, err.chain());
        }
    }

    match fs::write(&target, &rendered.text) {
        Ok(()) => ProcessResult::Success(target.display().to_string()),
        Err(e) => ProcessResult::Failed(
            label,
            JobgenError::FileWriteError {
                path: target.display().to_string(),
                source: e,
            }
            .chain(),
        ),
    }
}

/// 自动检测结果在整个批次内只探测一次
struct CachedProbe<P> {
    inner: P,
    pbs: OnceLock<bool>,
    slurm: OnceLock<bool>,
}

impl<P: ExecutableProbe> CachedProbe<P> {
    fn new(inner: P) -> Self {
        Self {
            inner,
            pbs: OnceLock::new(),
            slurm: OnceLock::new(),
        }
    }
}

impl<P: ExecutableProbe> ExecutableProbe for CachedProbe<P> {
    fn is_available(&self, program: &str) -> bool {
        match program {
            PBS_SUBMIT_TOOL => *self.pbs.get_or_init(|| self.inner.is_available(program)),
            SLURM_SUBMIT_TOOL => *self.slurm.get_or_init(|| self.inner.is_available(program)),
            _ => self.inner.is_available(program),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProbe {
        calls: AtomicUsize,
    }

    impl ExecutableProbe for CountingProbe {
        fn is_available(&self, program: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            program == SLURM_SUBMIT_TOOL
        }
    }

    const JOB: &str = r#"
name = "run1"
node_count = 1
ranks_per_node = 2
executable = "./sim"
"#;

    #[test]
    fn test_cached_probe_asks_once() {
        let probe = CachedProbe::new(CountingProbe {
            calls: AtomicUsize::new(0),
        });
        for _ in 0..5 {
            assert!(!probe.is_available(PBS_SUBMIT_TOOL));
            assert!(probe.is_available(SLURM_SUBMIT_TOOL));
        }
        assert_eq!(probe.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_render_one_writes_script() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let job_path = input.path().join("run1.toml");
        fs::write(&job_path, JOB).unwrap();

        let overrides = RenderOverrides::default();
        let probe = CountingProbe {
            calls: AtomicUsize::new(0),
        };

        let settings = BatchSettings::new(input.path(), out.path(), None, &overrides, false);
        let result = render_one(&job_path, &settings, &probe);
        let target = out.path().join("run1.slurm");
        assert_eq!(result, ProcessResult::Success(target.display().to_string()));
        let script = fs::read_to_string(&target).unwrap();
        assert!(script.contains("#SBATCH --job-name=run1"));

        // 下一批次：已存在且未指定 overwrite
        let settings = BatchSettings::new(input.path(), out.path(), None, &overrides, false);
        let result = render_one(&job_path, &settings, &probe);
        assert_eq!(result, ProcessResult::Skipped(target.display().to_string()));
    }

    #[test]
    fn test_same_stem_in_subdirectories_kept_apart() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        for dir in ["a", "b"] {
            fs::create_dir_all(input.path().join(dir)).unwrap();
            fs::write(input.path().join(dir).join("run.toml"), JOB).unwrap();
        }

        let files = FileCollector::new(input.path().to_path_buf())
            .with_pattern("*.toml")
            .unwrap()
            .recursive(true)
            .collect();
        assert_eq!(files.len(), 2);

        let overrides = RenderOverrides::default();
        let settings =
            BatchSettings::new(input.path(), out.path(), Some("bare"), &overrides, false);
        let probe = CountingProbe {
            calls: AtomicUsize::new(0),
        };

        let result = BatchRunner::new(2)
            .show_progress(false)
            .run(files, |path| render_one(path, &settings, &probe));
        assert_eq!(result.success, 2);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.failed, 0);

        assert!(out.path().join("a").join("run.sh").is_file());
        assert!(out.path().join("b").join("run.sh").is_file());
        assert!(!out.path().join("run.sh").exists());
    }

    #[test]
    fn test_conflicting_outputs_fail() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let first = input.path().join("run.toml");
        let second = input.path().join("run.job");
        fs::write(&first, JOB).unwrap();
        fs::write(&second, JOB).unwrap();

        let overrides = RenderOverrides::default();
        let settings =
            BatchSettings::new(input.path(), out.path(), Some("bare"), &overrides, true);
        let probe = CountingProbe {
            calls: AtomicUsize::new(0),
        };

        let target = out.path().join("run.sh");
        assert_eq!(
            render_one(&first, &settings, &probe),
            ProcessResult::Success(target.display().to_string())
        );
        match render_one(&second, &settings, &probe) {
            ProcessResult::Failed(path, err) => {
                assert!(path.ends_with("run.job"));
                assert!(err.contains("already produced by another job file"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_render_one_reports_failure() {
        let input = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let job_path = input.path().join("broken.toml");
        fs::write(&job_path, "name = \"broken\"\n").unwrap();

        let overrides = RenderOverrides::default();
        let settings =
            BatchSettings::new(input.path(), out.path(), Some("bare"), &overrides, true);
        let probe = CountingProbe {
            calls: AtomicUsize::new(0),
        };

        match render_one(&job_path, &settings, &probe) {
            ProcessResult::Failed(path, err) => {
                assert!(path.ends_with("broken.toml"));
                assert!(err.contains("no executable"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }
}
