pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod output;
pub mod processor;
pub mod search;
pub mod walker;

pub use crate::error::{GrimoireError, Result};
pub use clap::Parser;
pub use cli::{Cli, ColorChoice, OutputFormat};
pub use config::Config;
pub use metrics::Metrics;
pub use output::{FileSummary, View, render_json, render_text, summarize};
pub use processor::{ContextWindow, FileContents, LineMatcher, SearchMatch, read_lines};
pub use search::{QueryKey, ResultCache, SearchEngine, SearchSettings};
pub use walker::{LimitSpec, resolve, walk_dir};
