//! CLI entry point for the bikeshare statistics explorer.
//!
//! Runs the interactive session by default, or prints a single report for a
//! city and filter given on the command line.

use anyhow::{Context, Result, anyhow};
use bikeshare_stats::analyzers::build_report;
use bikeshare_stats::config::CityRegistry;
use bikeshare_stats::filter::{self, Selection, parse_day_choice, parse_month_choice};
use bikeshare_stats::loader::load_city;
use bikeshare_stats::output::{self, title_case};
use bikeshare_stats::prompt::Prompter;
use bikeshare_stats::session::Session;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bike-share trip data", long_about = None)]
struct Cli {
    /// Directory the city CSV files are read from
    #[arg(short, long, global = true, default_value = ".")]
    data_dir: PathBuf,

    /// JSON file listing cities and their CSV files (replaces the built-in list)
    #[arg(long, global = true, value_name = "FILE")]
    cities: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a city and filters interactively and browse the statistics (default)
    Explore,
    /// Print the statistics for one city without prompting
    Report {
        /// City name as listed by `list-cities`
        city: String,

        /// Month number 1-6, or "a" for all
        #[arg(short, long, default_value = "a")]
        month: String,

        /// Day number 1-7 (Monday=1), or "a" for all
        #[arg(short = 'w', long, default_value = "a")]
        day: String,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the configured cities
    ListCities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stderr stays quiet by default so log lines don't interleave with prompts
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(env_filter("RUST_LOG", "warn"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let registry = match &cli.cities {
        Some(path) => CityRegistry::load(path, &cli.data_dir)?,
        None => CityRegistry::builtin(&cli.data_dir),
    };
    info!(cities = registry.len(), data_dir = %cli.data_dir.display(), "City registry ready");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = io::stdin();
            let prompter = Prompter::new(stdin.lock(), io::stdout());
            Session::new(&registry, prompter).run()?;
        }
        Commands::Report {
            city,
            month,
            day,
            json,
        } => {
            report(&registry, &city, &month, &day, json)?;
        }
        Commands::ListCities => {
            let mut out = io::stdout().lock();
            for (idx, city) in registry.iter().enumerate() {
                writeln!(
                    out,
                    "{:>3}. {:<20} {}",
                    idx + 1,
                    title_case(&city.name),
                    city.file.display()
                )?;
            }
        }
    }

    Ok(())
}

/// Reads filter directives from the environment variable `var`, falling back
/// to `default` when it is unset, empty or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    directives_or(std::env::var(var).ok().as_deref(), default)
}

fn directives_or(directives: Option<&str>, default: &str) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Runs one load/filter/report cycle for the given city and filter tokens.
#[tracing::instrument(skip(registry))]
fn report(registry: &CityRegistry, city: &str, month: &str, day: &str, json: bool) -> Result<()> {
    let city = registry
        .find(city)
        .cloned()
        .ok_or_else(|| anyhow!("unknown city '{city}', see `list-cities`"))?;
    let month = parse_month_choice(month)
        .ok_or_else(|| anyhow!("invalid month '{month}', expected 1-6 or a"))?;
    let day =
        parse_day_choice(day).ok_or_else(|| anyhow!("invalid day '{day}', expected 1-7 or a"))?;
    let selection = Selection { city, month, day };

    let dataset = load_city(&selection.city)
        .with_context(|| format!("report for {} failed", selection.city.name))?;
    let filtered = filter::apply(&dataset, &selection);
    let report = build_report(&selection, dataset.len(), &filtered);

    let mut out = io::stdout().lock();
    if json {
        output::print_json(&mut out, &report)
    } else {
        output::print_report(&mut out, &report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_directives_override_default_level() {
        let filter = directives_or(Some("debug"), "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_default_level_when_unset_or_blank() {
        assert_eq!(directives_or(None, "warn").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(directives_or(Some("  "), "warn").max_level_hint(), Some(LevelFilter::WARN));
    }
}
