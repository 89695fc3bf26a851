//! spam-rs: command-line spam checker
//!
//! # Usage
//!
//! ```bash
//! # Classify text given on the command line
//! spam-rs check "WIN a FREE prize!!! Click here"
//!
//! # Classify text from stdin
//! cat message.txt | spam-rs check
//!
//! # Classify a file, printing the result as JSON
//! spam-rs --json file message.eml
//!
//! # Use a custom keyword list and threshold
//! spam-rs --config spam-rs.toml file message.eml
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use spam_rs::config::{Config, LogFormat, LoggingConfig};
use spam_rs::loader::{load_email, load_stdin};
use spam_rs::report;
use spam_rs::spam::SpamDetector;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(version, about = "Rule-based email spam classifier", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the classification as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify text given as an argument, or read from stdin
    Check {
        /// Email text
        text: Option<String>,
    },
    /// Classify the contents of a file
    File {
        /// Path to the email file
        path: PathBuf,
    },
    /// List the configured spam keywords
    Keywords,
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spam_rs={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Invalid configuration {}", path.display()))?,
        None => Config::default(),
    };

    init_logging(&config.logging);
    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &cli.config {
        info!(
            "Loaded configuration from {} ({} keywords, threshold {})",
            path.display(),
            config.detector.keywords.len(),
            config.detector.threshold
        );
    }

    let detector = SpamDetector::new(config.detector)?;

    let text = match cli.command {
        Commands::Keywords => {
            for keyword in detector.keywords() {
                println!("{}", keyword);
            }
            return Ok(());
        }
        Commands::Check { text: Some(text) } => text,
        Commands::Check { text: None } => load_stdin()?,
        Commands::File { path } => match load_email(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        },
    };

    let classification = detector.classify(&text);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
    } else {
        print!("{}", report::render(&classification));
    }

    Ok(())
}
