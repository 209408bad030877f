use crate::error::Result;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// One matched line together with its surrounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub file_path: PathBuf,
    /// 1-based position of the matched line at scan time.
    pub line_number: usize,
    pub line_content: String,
    pub context_before: Vec<String>,
    pub context_after: Vec<String>,
}

/// Outcome of reading a file as text.
#[derive(Debug)]
pub enum FileContents {
    Lines(Vec<String>),
    /// The file is not valid UTF-8.
    Undecodable,
    Unreadable(io::Error),
}

impl FileContents {
    /// Lines to match against; files that could not be read contribute none.
    pub fn lines(&self) -> &[String] {
        match self {
            FileContents::Lines(lines) => lines,
            FileContents::Undecodable | FileContents::Unreadable(_) => &[],
        }
    }
}

/// Reads every line of `path` with terminators stripped. The handle is dropped
/// before returning on every path.
pub fn read_lines(path: &Path) -> FileContents {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return FileContents::Unreadable(e),
    };
    let mut text = String::new();
    match BufReader::new(file).read_to_string(&mut text) {
        Ok(_) => FileContents::Lines(split_lines(&text)),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => FileContents::Undecodable,
        Err(e) => FileContents::Unreadable(e),
    }
}

/// Splits on `\n`, `\r\n` and a bare `\r`. A trailing terminator does not start
/// an extra empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(pos) => {
                lines.push(rest[..pos].to_string());
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }
    lines
}

/// Exact, case-sensitive comparison of the file's `.ext` suffix against `allowed`.
pub fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    allowed
        .iter()
        .any(|a| a.strip_prefix('.').is_some_and(|a| a == ext))
}

pub fn build_regex(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Context line counts after clamping to the configured maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContextWindow {
    pub after: usize,
    pub before: usize,
}

impl ContextWindow {
    pub fn clamped(after: usize, before: usize, max_context_lines: usize) -> Self {
        Self {
            after: after.min(max_context_lines),
            before: before.min(max_context_lines),
        }
    }
}

/// Case-insensitive, per-line regex matcher.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    regex: Regex,
    window: ContextWindow,
}

impl LineMatcher {
    pub fn new(pattern: &str, window: ContextWindow) -> Result<Self> {
        Ok(Self {
            regex: build_regex(pattern)?,
            window,
        })
    }

    pub fn window(&self) -> ContextWindow {
        self.window
    }

    /// Yields at most one match per line, however many times the pattern occurs in it.
    pub fn match_lines(&self, file_path: &Path, lines: &[String]) -> Vec<SearchMatch> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.regex.is_match(line))
            .map(|(i, line)| {
                let start = i.saturating_sub(self.window.before);
                let end = i
                    .saturating_add(self.window.after)
                    .saturating_add(1)
                    .min(lines.len());
                SearchMatch {
                    file_path: file_path.to_path_buf(),
                    line_number: i + 1,
                    line_content: line.clone(),
                    context_before: lines[start..i].to_vec(),
                    context_after: lines[i + 1..end].to_vec(),
                }
            })
            .collect()
    }
}
