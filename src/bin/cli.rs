//! allcpp-search CLI
//!
//! Prints search results as JSON envelopes on stdout; logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use allcpp_search::{
    error::{AppError, Result},
    models::{ApiResponse, Config, RawResponse},
    pipeline::EventSearch,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// allcpp-search - Convention listing search
#[derive(Parser, Debug)]
#[command(name = "allcpp-search", version, about = "Search the allcpp event listing")]
struct Cli {
    /// Path to config file (default: ./config.toml, then next to the binary)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search events by keyword
    Search {
        keyword: String,

        /// Print the undecorated first page instead
        #[arg(long)]
        raw: bool,
    },

    /// List every event, ended events last
    All,

    /// Validate configuration
    Validate,
}

/// Initialize logging from the verbosity flag and configured level.
fn init_logging(verbose: bool, config: Option<&Config>) {
    let level = match config {
        _ if verbose => "debug",
        Some(config) => config.log_level(),
        None => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = Config::load_or_locate(path)?;
    config.apply_env_overrides();
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the failure envelope for fetch errors, propagate anything else.
fn report_failure(error: AppError) -> Result<bool> {
    if !error.is_fetch_error() {
        return Err(error);
    }
    log::error!("Fetch failed: {}", error);
    print_json(&ApiResponse::fetch_failed(&error))?;
    Ok(false)
}

async fn run(command: Command, config: &Config) -> Result<bool> {
    match command {
        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("✓ Config OK");
        }

        Command::Search { keyword, raw } => {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                print_json(&ApiResponse::missing_keyword())?;
                return Ok(false);
            }

            let search = EventSearch::from_config(config)?;
            if raw {
                match search.fetch_raw(keyword).await {
                    Ok(page) => print_json(&RawResponse::from(page))?,
                    Err(error) => return report_failure(error),
                }
            } else {
                match search.search_by_keyword(keyword).await {
                    Ok(outcome) => print_json(&ApiResponse::search(keyword, outcome.events))?,
                    Err(error) => return report_failure(error),
                }
            }
        }

        Command::All => {
            let search = EventSearch::from_config(config)?;
            match search.search_all().await {
                Ok(outcome) => {
                    print_json(&ApiResponse::catalog(outcome.events, outcome.total))?
                }
                Err(error) => return report_failure(error),
            }
        }
    }

    Ok(true)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    init_logging(cli.verbose, config.as_ref().ok());

    let config = match config {
        Ok(config) => config,
        Err(error) => {
            log::error!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
