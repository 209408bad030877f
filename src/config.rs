use crate::error::{GrimoireError, Result};
use crate::search::SearchSettings;
use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Roots filled from the environment when the config file names none.
pub const ENV_ROOTS: [(&str, &str); 3] = [
    ("notes", "GRIMOIRE_NOTES_PATH"),
    ("resources", "GRIMOIRE_RESOURCES_PATH"),
    ("sources", "GRIMOIRE_SOURCES_PATH"),
];

pub fn default_extensions() -> Vec<String> {
    [".txt", ".md", ".h", ".cpp", ".inl", ".as"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

/// On-disk layout of `config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub paths: BTreeMap<String, String>,
    pub filetypes: FileTypesSection,
    pub behavior: BehaviorSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTypesSection {
    pub extensions: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorSection {
    pub max_context_lines: Option<i64>,
    pub cache_enabled: Option<bool>,
    pub cache_size: Option<i64>,
}

/// Effective settings after merging the config file, environment and defaults.
///
/// Numbers stay signed here so that `validate` can report negative values.
#[derive(Debug, Clone)]
pub struct Config {
    pub search_paths: BTreeMap<String, PathBuf>,
    pub file_types: Vec<String>,
    pub max_context_lines: i64,
    pub cache_results: bool,
    pub cache_size: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_paths: BTreeMap::new(),
            file_types: default_extensions(),
            max_context_lines: 10,
            cache_results: true,
            cache_size: 100,
        }
    }
}

impl Config {
    /// Loads the first config file found, falling back to the environment and
    /// defaults. A broken config file is reported and otherwise ignored.
    pub fn load() -> Self {
        let file = Self::find_config_path().and_then(|path| match Self::read_file(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Error reading config file: {e:#}");
                None
            }
        });
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    pub fn find_config_path() -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("grimoire/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".config/grimoire/config.toml"));
            candidates.push(home.join(".grimoire.toml"));
        }
        candidates.into_iter().find(|path| path.exists())
    }

    pub fn read_file(path: &Path) -> anyhow::Result<ConfigFile> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Merges an optional parsed file with values looked up through `env`.
    pub fn resolve(file: Option<ConfigFile>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config {
            file_types: Vec::new(),
            ..Config::default()
        };

        if let Some(file) = file {
            config.search_paths = file
                .paths
                .into_iter()
                .filter(|(_, path)| !path.is_empty())
                .map(|(name, path)| (name, PathBuf::from(path)))
                .collect();
            config.file_types = file.filetypes.extensions;
            if let Some(max) = file.behavior.max_context_lines {
                config.max_context_lines = max;
            }
            if let Some(enabled) = file.behavior.cache_enabled {
                config.cache_results = enabled;
            }
            if let Some(size) = file.behavior.cache_size {
                config.cache_size = size;
            }
        }

        if config.search_paths.is_empty() {
            config.search_paths = ENV_ROOTS
                .iter()
                .map(|&(name, var)| (name.to_string(), PathBuf::from(env(var).unwrap_or_default())))
                .collect();
        }

        if config.file_types.is_empty() {
            config.file_types = default_extensions();
        }

        config
    }

    /// Returns a human-readable message per problem. Only `used` roots are checked,
    /// or every configured root when `used` is empty.
    pub fn validate(&self, used: &[&str]) -> Vec<String> {
        let mut errors = Vec::new();

        let names: Vec<&str> = if used.is_empty() {
            self.search_paths.keys().map(String::as_str).collect()
        } else {
            used.to_vec()
        };

        for name in names {
            let Some(path) = self.search_paths.get(name) else {
                errors.push(format!(
                    "Search path '{name}' is not configured. Add it to your config file (~/.config/grimoire/config.toml)"
                ));
                continue;
            };

            if path.as_os_str().is_empty() {
                errors.push(format!(
                    "Path for '{name}' is not set. Edit your config file and set a valid path in the [paths] section:\n[paths]\n{name} = \"/path/to/your/{name}\""
                ));
                continue;
            }

            if !path.exists() {
                errors.push(format!(
                    "Search path '{name}' does not exist: {}\nUpdate the path in your config file: ~/.config/grimoire/config.toml",
                    path.display()
                ));
            }
        }

        for ext in &self.file_types {
            if !ext.starts_with('.') {
                errors.push(format!("File type must start with '.': {ext}"));
            }
        }

        if self.max_context_lines < 0 {
            errors.push("max_context_lines must be non-negative".to_string());
        }
        if self.cache_size < 0 {
            errors.push("cache_size must be non-negative".to_string());
        }

        errors
    }

    /// Snapshot handed to the search engine.
    pub fn settings(&self) -> Result<SearchSettings> {
        let max_context_lines = usize::try_from(self.max_context_lines)
            .map_err(|_| GrimoireError::Config("max_context_lines must be non-negative".into()))?;
        let cache_size = usize::try_from(self.cache_size)
            .map_err(|_| GrimoireError::Config("cache_size must be non-negative".into()))?;

        Ok(SearchSettings {
            roots: self.search_paths.clone(),
            extensions: self.file_types.clone(),
            max_context_lines,
            cache_enabled: self.cache_results,
            cache_size,
        })
    }
}
