mod console;
mod terminal;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use sysmon_core::config::DEFAULT_BASE_URL;
use sysmon_core::PollerConfig;
use sysmon_poller::{HttpMetricsSource, StatusPoller};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalView;

#[derive(Parser)]
#[command(name = "sysmon")]
#[command(about = "sysmon - terminal dashboard for system health metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Dashboard server URL (defaults to $SYSMON_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Refresh interval in milliseconds
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll continuously and redraw the dashboard (default)
    Watch,

    /// Refresh once, print the dashboard and exit
    Once,
}

fn get_base_url() -> String {
    std::env::var("SYSMON_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

fn resolve_config(cli: &Cli) -> Result<PollerConfig> {
    let mut config = match &cli.config {
        Some(path) => PollerConfig::load(path)?,
        None => PollerConfig::new(&get_base_url()),
    };

    if let Some(url) = &cli.url {
        config.base_url = url.clone();
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.poll_interval_ms = interval_ms;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.request_timeout_ms = timeout_ms;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Some(Commands::Once) => cmd_once(config).await?,
        Some(Commands::Watch) | None => cmd_watch(config).await?,
    }

    Ok(())
}

async fn cmd_watch(config: PollerConfig) -> Result<()> {
    tracing::info!("Watching {}", config.base_url);
    println!("Commands: hide, show, offline, online, quit (Ctrl-C to exit)");
    println!();

    let source = HttpMetricsSource::new(&config)?;
    let poller = StatusPoller::new(source, TerminalView::new(), config);

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(console::forward_stdin(tx.clone()));
    tokio::spawn(console::forward_ctrl_c(tx));

    poller.run(rx).await;
    tracing::info!("Dashboard closed");
    Ok(())
}

async fn cmd_once(config: PollerConfig) -> Result<()> {
    let source = HttpMetricsSource::new(&config)?;
    let mut poller = StatusPoller::new(source, TerminalView::new(), config);

    let outcome = poller.refresh().await;
    if !outcome.is_updated() {
        bail!("Server unreachable");
    }
    Ok(())
}
