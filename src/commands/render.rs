//! # render 命令实现
//!
//! 读取作业文件并输出批处理脚本。
//!
//! ## 功能
//! - 读取 TOML 作业文件
//! - 解析批处理系统（可自动检测）
//! - 输出到 stdout 或文件
//!
//! ## 依赖关系
//! - 使用 `cli/render.rs` 定义的参数
//! - 使用 `parsers/`, `engine/`
//! - 使用 `utils/output.rs`, `utils/detect.rs`

use super::{batch_request, effective_options};
use crate::cli::render::RenderArgs;
use crate::engine;
use crate::error::{JobgenError, Result};
use crate::models::BatchSystemKind;
use crate::parsers;
use crate::utils::detect::PathProbe;
use crate::utils::output;

use std::fs;
use std::io::Write;

/// 执行 render 命令
pub fn execute(args: RenderArgs) -> Result<()> {
    let job = parsers::load_job_file(&args.job_file)?;
    let options = effective_options(&job, &args.overrides);
    let request = batch_request(args.batch_system.as_deref(), &job);

    let rendered = engine::render_script(&job, &request, &options, &PathProbe)?;

    if request == BatchSystemKind::Autodetect {
        if rendered.batch_system == BatchSystemKind::Bare {
            output::print_warning("Neither qsub nor sbatch found on PATH, generating a bare script");
        } else {
            output::print_info(&format!(
                "Autodetected batch system: {}",
                rendered.batch_system
            ));
        }
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered.text).map_err(|e| JobgenError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            output::print_generated(
                &args.job_file.display().to_string(),
                &path.display().to_string(),
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.text.as_bytes())
                .and_then(|_| handle.flush())
                .map_err(|e| JobgenError::FileWriteError {
                    path: "<stdout>".to_string(),
                    source: e,
                })?;
        }
    }

    Ok(())
}
