//! # catalog CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalog_cli::category::{run_category, CategoryArgs};
use catalog_cli::check::{run_check, CheckArgs};
use catalog_cli::generate::{run_generate, GenerateArgs};
use catalog_cli::inspect::{run_inspect, InspectArgs};

/// Catalog attribute-schema tooling.
///
/// Parses, checks and generates typed bindings from category attribute
/// schemas, and validates category payloads.
#[derive(Parser, Debug)]
#[command(name = "catalog", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit log lines as JSON objects.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a schema and print the extracted model as JSON.
    Inspect(InspectArgs),

    /// Parse schemas and apply the supported-type policy.
    Check(CheckArgs),

    /// Generate typed Rust bindings from a schema.
    Generate(GenerateArgs),

    /// Validate a category create/update payload.
    Category(CategoryArgs),
}

/// `RUST_LOG` takes precedence over `-v`.
fn env_filter(verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "catalog CLI starting");

    let result = match cli.command {
        Commands::Inspect(args) => run_inspect(&args),
        Commands::Check(args) => run_check(&args),
        Commands::Generate(args) => run_generate(&args, cli.config.as_deref()),
        Commands::Category(args) => run_category(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
