//! Target-file resolution inside a search root.
use ignore::{DirEntry, WalkBuilder};
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Narrows a search to part of a root, as given on the command line with `--limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitSpec {
    /// An absolute path. Used as-is when it exists, even outside the root.
    Absolute(PathBuf),
    /// Path components that must all occur somewhere in a candidate's path.
    Fragments(Vec<String>),
}

impl LimitSpec {
    /// Returns `None` for an empty specifier, which means "no limit".
    pub fn parse(spec: &str) -> Option<Self> {
        if spec.is_empty() {
            return None;
        }

        let path = Path::new(spec);
        if path.is_absolute() {
            return Some(LimitSpec::Absolute(path.to_path_buf()));
        }

        let fragments = path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(LimitSpec::Fragments(fragments))
    }

    fn matches(fragments: &[String], candidate: &Path) -> bool {
        let candidate = candidate.to_string_lossy();
        fragments.iter().all(|f| candidate.contains(f.as_str()))
    }
}

/// Walks `path` recursively in file-name order.
///
/// Entries below `path` with a hidden component are neither yielded nor descended
/// into. Unreadable directories are skipped.
pub fn walk_dir(path: &Path) -> impl Iterator<Item = DirEntry> {
    WalkBuilder::new(path)
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                None
            }
        })
}

/// Produces the files to scan for one root.
///
/// Without a limit every non-hidden file under `base_dir` is returned. An absolute
/// limit that names an existing file bypasses `base_dir` entirely.
pub fn resolve(base_dir: &Path, limit: Option<&LimitSpec>) -> Vec<PathBuf> {
    match limit {
        None => walk_dir(base_dir)
            .filter(|entry| entry.path().is_file())
            .map(DirEntry::into_path)
            .collect(),
        Some(LimitSpec::Absolute(path)) => {
            if path.is_file() {
                vec![path.clone()]
            } else {
                debug!("Absolute limit {} is not an existing file", path.display());
                Vec::new()
            }
        }
        Some(LimitSpec::Fragments(fragments)) => walk_dir(base_dir)
            .filter(|entry| entry.path().is_file())
            .filter(|entry| LimitSpec::matches(fragments, entry.path()))
            .map(DirEntry::into_path)
            .collect(),
    }
}
