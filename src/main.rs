//! # jobgen - 批处理作业脚本生成器
//!
//! 一份作业描述，生成 PBS / Slurm / 普通 shell 提交脚本。
//!
//! ## 子命令
//! - `render`  - 渲染单个作业文件
//! - `batch`   - 批量渲染作业文件
//! - `inspect` - 显示作业字段与派生字段
//! - `detect`  - 显示自动检测到的批处理系统
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (作业文件解析)
//!   │     ├── engine/    (脚本生成引擎)
//!   │     ├── batch/     (批量处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod engine;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&e.chain());
        std::process::exit(1);
    }
}
