//! Payoff CLI - Inspect product books and evaluate scenario payoffs
//!
//! # Commands
//!
//! - `payoff describe --book <file>` - Describe every product in a book
//! - `payoff evaluate --book <file> --product <index> --scenario <file>` - Evaluate one product
//! - `payoff check` - Print the resolved configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use payoff_cli::config::{build_config, CliOverrides, LogLevel, OutputFormat, DEFAULT_CONFIG_FILE};
use payoff_cli::{commands, Result};

/// Monte Carlo product book inspection
#[derive(Parser)]
#[command(name = "payoff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe every product in a book
    Describe {
        /// Path to the book file (TOML)
        #[arg(short, long)]
        book: PathBuf,
    },

    /// Evaluate one product on a scenario
    Evaluate {
        /// Path to the book file (TOML)
        #[arg(short, long)]
        book: PathBuf,

        /// Index of the product in the book
        #[arg(short, long)]
        product: usize,

        /// Path to the scenario file (JSON)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Print the resolved configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        log_level: cli.log_level,
        output_format: match &cli.command {
            Commands::Evaluate { format, .. } => *format,
            _ => None,
        },
    };
    let config = build_config(&cli.config, &overrides)?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!("Configuration loaded from {}", cli.config.display());

    let output = match cli.command {
        Commands::Describe { book } => commands::describe::run(&book, &config)?,
        Commands::Evaluate {
            book,
            product,
            scenario,
            ..
        } => commands::evaluate::run(&book, product, &scenario, &config)?,
        Commands::Check => commands::check::run(&config)?,
    };

    print!("{}", output);
    Ok(())
}
