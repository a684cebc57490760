//! CLI application for fund factsheet extraction.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{batch, config, parse};
use factsheet_core::FactsheetError;

/// Exit status for unreadable inputs or unwritable outputs.
const EXIT_IO: u8 = 1;
/// Exit status for an invalid configuration; 2 is taken by clap usage errors.
const EXIT_CONFIG: u8 = 3;

/// Factsheet extraction - NAV price, NAV date and currency from factsheet text
#[derive(Parser)]
#[command(name = "factsheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a single text file
    Parse(parse::ParseArgs),

    /// Extract every text file in a directory or glob pattern
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // -v picks the level; RUST_LOG, when set, takes precedence
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {}", e);
    }

    // Documents without any recognizable field are not failures; only
    // configuration and I/O errors reach this point.
    let result = match cli.command {
        Commands::Parse(args) => parse::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::from(exit_status(&e))
        }
    }
}

fn exit_status(error: &anyhow::Error) -> u8 {
    let is_config = error.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<FactsheetError>(),
            Some(FactsheetError::Config(_))
        )
    });
    if is_config { EXIT_CONFIG } else { EXIT_IO }
}
