//! # 作业文件解析器
//!
//! 解析 TOML 格式的作业描述。
//!
//! ## 格式示例
//! ```toml
//! name = "run1"
//! node_count = 2
//! ranks_per_node = 4
//! threads_per_process = 2
//! walltime = "1h1m1s"
//! executable = "./sim"
//! arguments = ["--fast"]
//!
//! [render]
//! launcher = "plain"
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/job.rs`

use crate::error::{JobgenError, Result};
use crate::models::JobSpec;

use std::fs;
use std::path::Path;

/// 从文件读取作业描述
pub fn load_job_file(path: &Path) -> Result<JobSpec> {
    if !path.exists() {
        return Err(JobgenError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| JobgenError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_job_content(&content, &path.display().to_string())
}

/// 解析作业描述文本
pub fn parse_job_content(content: &str, source_name: &str) -> Result<JobSpec> {
    toml::from_str(content).map_err(|e| JobgenError::JobFileParse {
        path: source_name.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LauncherFlavor, LogLayout};
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_parse_full_job() {
        let content = r##"
name = "run1"
node_count = 2
ranks_per_node = 4
threads_per_process = 2
node_type = "rome"
walltime = "01:01:01"
email = "me@example.org"
log_directory = "logs"
working_directory = "/scratch/run1"
executable = "./sim"
module_pre_script = ["module purge"]
load_modules = ["gcc/12", "openmpi/4"]
pre_script = ["echo start"]
runtime_prefix = ["nsys", "profile"]
arguments = ["--fast"]
post_script = ["echo done"]
print_omp_environment = true
extra_directives = ["#SBATCH --account=proj"]

[render]
batch_system = "slurm"
launcher = "plain"
log_layout = "nested"
"##;
        let job = parse_job_content(content, "inline").unwrap();
        assert_eq!(job.name, "run1");
        assert_eq!(job.node_count, 2);
        assert_eq!(job.ranks_per_node, 4);
        assert_eq!(job.threads_per_process, 2);
        assert_eq!(job.walltime, Duration::from_secs(3661));
        assert_eq!(job.load_modules, vec!["gcc/12", "openmpi/4"]);
        assert_eq!(job.runtime_prefix, vec!["nsys", "profile"]);
        assert!(job.print_omp_environment);
        assert_eq!(job.render.batch_system.as_deref(), Some("slurm"));
        assert_eq!(job.render.launcher, LauncherFlavor::Plain);
        assert_eq!(job.render.log_layout, LogLayout::Nested);
    }

    #[test]
    fn test_minimal_job_uses_defaults() {
        let job = parse_job_content("name = \"x\"\nexecutable = \"./a\"", "inline").unwrap();
        assert_eq!(job.node_count, 0);
        assert_eq!(job.walltime, Duration::ZERO);
        assert!(job.arguments.is_empty());
        assert!(job.render.mail);
    }

    #[test]
    fn test_legacy_keys_match_snake_case() {
        let legacy = r#"
Name = "run1"
NumberOfNodes = 2
NodeType = "rome"
NumberOfMPIRanksPerNode = 4
NumberOfOMPThreadsPerProcess = 2
Walltime = "1h1m1s"
Email = "me@example.org"
LogDirectory = "logs"
PrintOMPEnvironment = true
LoadModules = ["gcc/12"]
WorkingDirectory = "work"
PreScript = ["echo start"]
EntryPoint = "./sim"
PostScript = ["echo done"]
"#;
        let modern = r#"
name = "run1"
node_count = 2
node_type = "rome"
ranks_per_node = 4
threads_per_process = 2
walltime = 3661
email = "me@example.org"
log_directory = "logs"
print_omp_environment = true
load_modules = ["gcc/12"]
working_directory = "work"
pre_script = ["echo start"]
executable = "./sim"
post_script = ["echo done"]
"#;
        assert_eq!(
            parse_job_content(legacy, "legacy").unwrap(),
            parse_job_content(modern, "modern").unwrap()
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_job_content("name = \"x\"\nnodes = 3", "bad.toml").unwrap_err();
        match err {
            JobgenError::JobFileParse { path, .. } => assert_eq!(path, "bad.toml"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        assert!(parse_job_content("name = \"x\"\nnode_count = -1", "bad.toml").is_err());
    }

    #[test]
    fn test_load_job_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"disk\"\nexecutable = \"./a\"").unwrap();
        let job = load_job_file(file.path()).unwrap();
        assert_eq!(job.name, "disk");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_job_file(Path::new("/nonexistent/job.toml")).unwrap_err();
        assert!(matches!(err, JobgenError::FileNotFound { .. }));
    }
}
