//! Shared fixtures for integration tests
#![allow(dead_code)]

use grimoire::search::SearchSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding one sub-directory per search root
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn root_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory backing the root `name`, created on demand
    pub fn root(&self, name: &str) -> PathBuf {
        let path = self.root_dir().join(name);
        fs::create_dir_all(&path).expect("Failed to create root directory");
        path
    }

    /// Writes `content` to `rel` inside root `root`, creating parent directories
    pub fn create_file(&self, root: &str, rel: &str, content: &str) -> PathBuf {
        self.create_bytes(root, rel, content.as_bytes())
    }

    pub fn create_bytes(&self, root: &str, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.root(root).join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Settings with every named root registered and default everything else
    pub fn settings(&self, roots: &[&str]) -> SearchSettings {
        let mut settings = SearchSettings::default();
        for name in roots {
            settings.roots.insert(name.to_string(), self.root(name));
        }
        settings
    }
}
