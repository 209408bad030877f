//! Search engine with result caching
pub mod cache;
pub mod engine;

use std::collections::BTreeMap;
use std::path::PathBuf;

pub use cache::{QueryKey, ResultCache};
pub use engine::SearchEngine;

/// Read-only configuration snapshot consumed by the engine
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Root name to base directory.
    pub roots: BTreeMap<String, PathBuf>,
    /// Allowed extensions, each starting with `.`.
    pub extensions: Vec<String>,
    pub max_context_lines: usize,
    pub cache_enabled: bool,
    pub cache_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            roots: BTreeMap::new(),
            extensions: crate::config::default_extensions(),
            max_context_lines: 10,
            cache_enabled: true,
            cache_size: 100,
        }
    }
}
