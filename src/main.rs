use clap::Parser;
use colored::*;
use env_logger::{Builder, Env, Target};
use grimoire::cli::{Cli, ColorChoice, OutputFormat};
use grimoire::config::Config;
use grimoire::error::{GrimoireError, Result as GrimoireResult};
use grimoire::output;
use grimoire::search::SearchEngine;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use log::info;
use std::fs;
use std::process::ExitCode;
use std::time::{Duration, Instant};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = setup_logging(&cli) {
        eprintln!("{}", format!("Failed to initialise logging: {e}").red());
    }
    apply_color_choice(cli.color);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "Error during search:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> GrimoireResult<ExitCode> {
    let start_time = Instant::now();
    let roots = cli.roots();

    let mut config = Config::load();
    if cli.no_cache {
        config.cache_results = false;
    }

    let errors = config.validate(&roots);
    if !errors.is_empty() {
        eprintln!("{}", "Configuration errors:".red().bold());
        for error in errors {
            eprintln!("  - {error}");
        }
        eprintln!("\nPlease create a config file at ~/.config/grimoire/config.toml");
        eprintln!("See README.md for configuration examples.");
        return Ok(ExitCode::FAILURE);
    }

    let mut engine = SearchEngine::new(config.settings()?);
    engine.set_limit(cli.limit.as_deref());
    info!(
        "Searching {:?} for {:?} (limit: {:?})",
        roots,
        cli.pattern(),
        engine.limit()
    );

    let pb = ProgressBar::new_spinner().with_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| GrimoireError::Other(e.to_string()))?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(format!("Searching {}...", roots.join(", ")));
    pb.enable_steady_tick(Duration::from_millis(100));

    let results = engine.search(
        cli.pattern(),
        &roots,
        cli.context_after(),
        cli.context_before(),
    );
    pb.finish_and_clear();
    let results = results?;

    let rendered = match cli.format {
        OutputFormat::Text => output::render_text(&results, cli.show_context(), cli.view()),
        OutputFormat::Json => output::render_json(&results, cli.view())?,
    };
    println!("{rendered}");

    if cli.metrics {
        eprint!("{}", engine.metrics.gather());
    }

    info!(
        "Found {} matches in {:.2?}",
        results.len(),
        start_time.elapsed()
    );
    Ok(ExitCode::SUCCESS)
}

fn apply_color_choice(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {
            if !std::io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}

fn setup_logging(cli: &Cli) -> GrimoireResult<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent()
            && !parent_dir.as_os_str().is_empty()
            && !parent_dir.exists()
        {
            fs::create_dir_all(parent_dir)?;
        }
        let log_file = fs::File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| GrimoireError::Other(e.to_string()))?;
    Ok(())
}
