//! `umistat` — terminal widget showing visitor counters from a Umami share.
//!
//! Performs one two-step fetch against the share API on startup and renders
//! three labeled counters (pageviews, visits, visitors). While the fetch is
//! in flight every counter shows `加载中...`; on any failure the counters
//! degrade to `-`.
//!
//! Logs are written to a file (default `/tmp/umistat.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod fetch;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use umistat_config::Config;

use crate::app::App;

/// Terminal widget for Umami visitor statistics.
#[derive(Parser, Debug)]
#[command(name = "umistat", version, about)]
struct Cli {
    /// Analytics endpoint base URL (e.g., https://stats.example.com)
    #[arg(short, long, env = "UMISTAT_ENDPOINT")]
    endpoint: Option<String>,

    /// Public share identifier
    #[arg(short, long, env = "UMISTAT_SHARE_ID")]
    share_id: Option<String>,

    /// Log file path (defaults to /tmp/umistat.log)
    #[arg(long, default_value = "/tmp/umistat.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("umistat={log_level},umistat_api={log_level}"))
    });

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("umistat.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve the effective config: config file + env, then CLI overrides.
fn resolve_config(cli: &Cli) -> Config {
    let mut config = umistat_config::load_config_or_default();
    if let Some(ref endpoint) = cli.endpoint {
        config.endpoint.clone_from(endpoint);
    }
    if let Some(ref share_id) = cli.share_id {
        config.share_id.clone_from(share_id);
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = resolve_config(&cli);
    info!(
        endpoint = %config.endpoint,
        share_id = %config.share_id,
        "starting umistat"
    );

    let mut app = App::new(config);
    app.run().await?;

    Ok(())
}
