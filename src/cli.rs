use crate::output::View;
use clap::{ArgGroup, Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// Pattern used when only `--line` is given.
pub const MATCH_ANY_LINE: &str = ".";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Search through technical documentation.",
    long_about = None,
    after_help = "At least one search location must be specified."
)]
#[command(group(
    ArgGroup::new("locations")
        .required(true)
        .multiple(true)
        .args(["notes", "resources", "sources"])
))]
pub struct Cli {
    /// Search pattern (case-insensitive regular expression)
    #[arg(required_unless_present = "line")]
    pub pattern: Option<String>,

    /// Search in technical notes
    #[arg(short, long)]
    pub notes: bool,

    /// Search in resources directory
    #[arg(short, long)]
    pub resources: bool,

    /// Search in source code directory
    #[arg(short, long)]
    pub sources: bool,

    /// Number of context lines to show after the match
    #[arg(short = 'c', long = "context", default_value_t = 0, allow_negative_numbers = true)]
    pub context: i64,

    /// Number of context lines to show before the match
    #[arg(short = 'C', long, default_value_t = 0, allow_negative_numbers = true)]
    pub context_before: i64,

    /// Limit search to a specific file or path fragment
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Disable result caching
    #[arg(long, default_value_t = false)]
    pub no_cache: bool,

    /// Show only file summary with match counts
    #[arg(short = 'm', long, default_value_t = false)]
    pub summary: bool,

    /// Show only the specified line number from results
    #[arg(short = 'L', long)]
    pub line: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Print search counters to stderr when done
    #[arg(long, default_value_t = false)]
    pub metrics: bool,
}

impl Cli {
    /// Requested roots, always in notes, resources, sources order.
    pub fn roots(&self) -> Vec<&'static str> {
        [
            (self.notes, "notes"),
            (self.resources, "resources"),
            (self.sources, "sources"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or(MATCH_ANY_LINE)
    }

    /// Negative values clamp to zero.
    pub fn context_after(&self) -> usize {
        clamp_count(self.context)
    }

    pub fn context_before(&self) -> usize {
        clamp_count(self.context_before)
    }

    pub fn show_context(&self) -> bool {
        self.context > 0 || self.context_before > 0
    }

    pub fn view(&self) -> View {
        match (self.line, self.summary) {
            (Some(line), _) => View::Line(line),
            (None, true) => View::Summary,
            (None, false) => View::Detail,
        }
    }
}

/// Negative counts become 0; counts beyond `usize` saturate.
fn clamp_count(n: i64) -> usize {
    if n <= 0 {
        0
    } else {
        usize::try_from(n).unwrap_or(usize::MAX)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorChoice::Auto => write!(f, "auto"),
            ColorChoice::Always => write!(f, "always"),
            ColorChoice::Never => write!(f, "never"),
        }
    }
}
