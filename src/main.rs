//! richtrace demo.
//!
//! Installs rich rendering and emits a tour of records through both the
//! `log` facade and `tracing`, optionally finishing with a panic to show the
//! exception hook.

use std::path::PathBuf;

use clap::Parser;
use richtrace::config::{load_config, RichConfig};
use richtrace::{critical, styled, success, LevelSpec};

#[derive(Parser)]
#[command(name = "richtrace-demo")]
#[command(about = "Show what rich terminal logging looks like", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum level, by name or number
    #[arg(short, long)]
    level: Option<LevelSpec>,

    /// strftime pattern for the time line
    #[arg(long)]
    time_format: Option<String>,

    /// Render errors and panics as plain text
    #[arg(long)]
    no_traceback: bool,

    /// Panic at the end
    #[arg(long)]
    panic: bool,
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to sync inventory")]
    Sync(#[source] std::io::Error),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RichConfig::default(),
    };

    let mut options = config.into_options();
    if let Some(level) = cli.level {
        options = options.level(level);
    }
    if let Some(format) = cli.time_format {
        options = options.time_format(format.as_str());
    }
    if cli.no_traceback {
        options = options.rich_tracebacks(false);
    }

    richtrace::install(options)?;

    log::info!("GET /index.html 200 1298");
    log::warn!("POST /login 401 from 10.0.0.7");
    tracing::debug!(path = "/var/lib/app", "scanning {} files", 42);
    styled!("red bold", "Sth is happening!");
    tracing::info!(alt = "[green]connected[/] to [bold]db-1[/]", "connected to db-1");
    tracing::info!(highlighter = "null", "no highlighting: 'quoted' 123 None");
    tracing::info!(text = "[replaced text]", "original text");
    tracing::info!(markup = false, "[bold]brackets stay literal[/bold]");
    success!(job = "backup", "all files copied");

    let err = DemoError::Sync(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ));
    tracing::error!(error = &err as &dyn std::error::Error, "sync failed");
    critical!("giving up after {} retries", 3);

    if cli.panic {
        let items: Vec<u32> = Vec::new();
        let index = items.len() + 2;
        panic!("index {} out of range for {} items", index, items.len());
    }

    Ok(())
}
