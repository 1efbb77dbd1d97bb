//! Result formatting shared by the CLI and the MCP server.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! outputs/zh.html (中文)
//! outputs/en.html (English)
//! Generated 2 pages
//! ```
//!
//! ## Init
//!
//! ```text
//! Project initialized in ./my-site
//!     manifest.json
//!     index.tmpl
//!     langs/index.json
//!     langs/zh-CN.json
//!     langs/en-US.json
//!
//! Run `multilang-gen gen ./my-site` to generate pages
//! ```
//!
//! Each `format_*` function is pure and returns lines; the `print_*` wrappers
//! write them to stdout.

use crate::config::GenerateOptions;
use crate::generate::GenerateReport;
use crate::init::SCAFFOLD_FILES;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// One line per rendered page plus a completion notice.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .map(|page| format!("{} ({})", page.path.display(), page.display_name))
        .collect();
    lines.push(format!("Generated {}", plural(report.pages.len(), "page")));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

/// Generation summary used as a tool result: pages, filter, and pattern.
pub fn format_generate_summary(report: &GenerateReport, options: &GenerateOptions) -> Vec<String> {
    let mut lines = format_generate_output(report);
    if !options.lang_codes.is_empty() {
        lines.push(format!("Languages: {}", options.lang_codes.join(", ")));
    }
    lines.push(format!("Output pattern: {}", options.output_pattern));
    lines
}

pub fn format_init_output(target_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!("Project initialized in {}", target_dir.display())];
    lines.extend(SCAFFOLD_FILES.iter().map(|f| format!("{}{}", indent(1), f)));
    lines.push(String::new());
    lines.push(format!(
        "Run `multilang-gen gen {}` to generate pages",
        target_dir.display()
    ));
    lines
}

pub fn print_init_output(target_dir: &Path) {
    for line in format_init_output(target_dir) {
        println!("{}", line);
    }
}
