//! Rendering of search results for the terminal and for JSON consumers
use crate::error::{GrimoireError, Result};
use crate::processor::SearchMatch;
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;

const RULE_WIDTH: usize = 80;

/// Which slice of the results to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Detail,
    Summary,
    /// Only the first match on this line number.
    Line(usize),
}

/// Per-file match counts for the summary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub count: usize,
    pub lines: Vec<usize>,
}

/// Groups matches by file, sorted by path, with line numbers ascending.
pub fn summarize(results: &[SearchMatch]) -> Vec<FileSummary> {
    let mut by_file: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for m in results {
        by_file
            .entry(m.file_path.display().to_string())
            .or_default()
            .push(m.line_number);
    }

    by_file
        .into_iter()
        .map(|(path, mut lines)| {
            lines.sort_unstable();
            FileSummary {
                path,
                count: lines.len(),
                lines,
            }
        })
        .collect()
}

fn find_line(results: &[SearchMatch], line: usize) -> Option<&SearchMatch> {
    results.iter().find(|m| m.line_number == line)
}

pub fn render_text(results: &[SearchMatch], show_context: bool, view: View) -> String {
    if results.is_empty() {
        return "No matches found.".yellow().to_string();
    }

    match view {
        View::Line(line) => match find_line(results, line) {
            Some(m) => render_match(m, show_context).join("\n"),
            None => format!("Line {line} not found in search results."),
        },
        View::Summary => render_summary(results),
        View::Detail => results
            .iter()
            .flat_map(|m| render_match(m, show_context))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_match(m: &SearchMatch, show_context: bool) -> Vec<String> {
    let mut output = vec![
        format!("\n{}", "=".repeat(RULE_WIDTH)),
        format!("{} {}", "File:".green().bold(), m.file_path.display()),
        format!("{} {}\n", "Line:".green().bold(), m.line_number),
    ];

    if show_context {
        output.extend(m.context_before.iter().map(|l| format!("  | {}", l.dimmed())));
    }
    output.push(format!("  {} {}", ">".yellow().bold(), m.line_content));
    if show_context {
        output.extend(m.context_after.iter().map(|l| format!("  | {}", l.dimmed())));
    }

    output
}

fn render_summary(results: &[SearchMatch]) -> String {
    let summary = summarize(results);
    let mut output = vec![
        format!("\n{}", "Search Result Summary:".bold()),
        "-".repeat(RULE_WIDTH),
    ];

    for file in &summary {
        output.push(format!("{:3} matches in {}", file.count, file.path));
        let lines: Vec<String> = file.lines.iter().map(usize::to_string).collect();
        output.push(format!("    Lines: {}", lines.join(", ")));
    }

    output.push("-".repeat(RULE_WIDTH));
    output.push(format!(
        "Total: {} files with {} matches",
        summary.len(),
        results.len()
    ));
    output.join("\n")
}

pub fn render_json(results: &[SearchMatch], view: View) -> Result<String> {
    let rendered = match view {
        View::Detail => serde_json::to_string_pretty(results),
        View::Summary => serde_json::to_string_pretty(&summarize(results)),
        View::Line(line) => {
            let found: Vec<&SearchMatch> = find_line(results, line).into_iter().collect();
            serde_json::to_string_pretty(&found)
        }
    };
    rendered.map_err(|e| GrimoireError::Other(format!("Failed to serialize results: {e}")))
}
