//! # 模板替换
//!
//! 将 `{{name}}`（也接受 `{{ .name }}`）占位符替换为作业字段或派生字段。
//! 未知字段名和未闭合的 `{{` 都会报错；替换只做一遍，替换结果不会再次展开。
//!
//! ## 依赖关系
//! - 被 `engine/header.rs`, `engine/command.rs` 使用
//! - 使用 `regex` crate

use crate::error::{JobgenError, Result, TemplateSegment};
use crate::models::{DerivedFields, JobSpec};

use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*\.?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex is valid")
});

/// 可引用的字段名
pub const FIELD_NAMES: &[&str] = &[
    "name",
    "node_count",
    "ranks_per_node",
    "threads_per_process",
    "node_type",
    "total_ranks",
    "tasks_per_node",
    "walltime",
    "email",
    "log_directory",
    "working_directory",
    "output_file",
    "error_file",
    "executable",
];

/// 模板上下文：作业描述加派生字段
pub struct TemplateContext<'a> {
    job: &'a JobSpec,
    derived: &'a DerivedFields,
}

impl<'a> TemplateContext<'a> {
    pub fn new(job: &'a JobSpec, derived: &'a DerivedFields) -> Self {
        Self { job, derived }
    }

    /// 按名字查找字段值
    pub fn lookup(&self, name: &str) -> Option<String> {
        let job = self.job;
        let derived = self.derived;
        let value = match name {
            "name" => job.name.clone(),
            "node_count" => job.node_count.to_string(),
            "ranks_per_node" => job.ranks_per_node.to_string(),
            "threads_per_process" => job.threads_per_process.to_string(),
            "node_type" => job.node_type.clone(),
            "total_ranks" => derived.total_ranks.to_string(),
            "tasks_per_node" => derived.tasks_per_node.to_string(),
            "walltime" => derived.walltime_text.clone(),
            "email" => job.email.clone(),
            "log_directory" => job.log_directory.clone(),
            "working_directory" => job.working_directory.clone(),
            "output_file" => derived.output_file.clone(),
            "error_file" => derived.error_file.clone(),
            "executable" => job.executable.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// 替换模板中的所有占位符
    pub fn substitute(&self, template: &str, segment: TemplateSegment) -> Result<String> {
        let mut rendered = String::with_capacity(template.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(field)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let literal = &template[last..whole.start()];
            check_literal(literal, segment)?;
            rendered.push_str(literal);

            let value = self.lookup(field.as_str()).ok_or_else(|| JobgenError::Template {
                segment,
                reason: format!(
                    "unknown field '{}' (available: {})",
                    field.as_str(),
                    FIELD_NAMES.join(", ")
                ),
            })?;
            rendered.push_str(&value);
            last = whole.end();
        }

        let tail = &template[last..];
        check_literal(tail, segment)?;
        rendered.push_str(tail);

        Ok(rendered)
    }
}

/// 占位符之间的文本不能再含有 `{{`
fn check_literal(literal: &str, segment: TemplateSegment) -> Result<()> {
    match literal.find("{{") {
        Some(pos) => {
            let snippet: String = literal[pos..].chars().take(24).collect();
            Err(JobgenError::Template {
                segment,
                reason: format!("malformed placeholder near '{}'", snippet),
            })
        }
        None => Ok(()),
    }
}
