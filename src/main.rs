use anyhow::Result;
use clap::Parser;
use domashka::config::{Config, LoggingConfig};
use domashka::poller::Poller;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "domashka",
    version,
    about = "Polls the Practicum homework-status API and reports review status changes to Telegram",
    long_about = None
)]
struct Cli {
    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Override the poll interval in seconds
    #[arg(long)]
    interval: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long)]
    log_format: Option<String>,

    /// Append-mode log file path (empty to disable)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials come from the environment; a local .env is honored when present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(interval) = cli.interval {
        config.poll.interval_secs = interval;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(file) = cli.log_file {
        config.logging.file = if file.is_empty() { None } else { Some(file) };
    }

    setup_tracing(&config.logging, cli.verbose)?;

    tracing::info!("domashka homework-status notifier starting");

    // Startup precondition: every credential must be present before the loop
    // is entered. A failed check aborts here, it is never merely logged.
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "configuration check failed, refusing to start");
        return Err(e);
    }

    let mut poller = Poller::new(&config)?;

    if cli.once {
        let outcome = poller.cycle().await?;
        tracing::info!(?outcome, cursor = poller.cursor(), "single cycle complete");
    } else {
        poller.run().await;
    }

    tracing::info!("domashka stopped");
    Ok(())
}

fn setup_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("domashka=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new(format!("domashka={},warn", logging.level))
    };

    let log_file = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(Arc::new(file))
        }
        None => None,
    };

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .with(log_file.map(|file| {
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(file)
                }))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .with(log_file.map(|file| {
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(file)
                }))
                .init();
        }
    }

    Ok(())
}
