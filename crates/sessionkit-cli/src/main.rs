//! sessionkit - sign in to a backend from the terminal and keep the session.
//!
//! Each subcommand drives one auth flow operation against the configured
//! backend. The session survives between runs in the configured storage.

mod actions;
mod commands;
mod terminal;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use sessionkit_core::Config;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use actions::Action;

/// Log file written inside the data directory
const LOG_FILE: &str = "sessionkit.log";

/// `dir` when the log file can be created in it.
fn usable_log_dir(dir: &Path) -> Option<&Path> {
    let ready = fs::create_dir_all(dir)
        .and_then(|()| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
        })
        .is_ok();
    ready.then_some(dir)
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to a file when the data directory is writable so the terminal
/// only shows notifications. Otherwise they go to stderr. The returned
/// guard must live until exit.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let matches = commands::new().get_matches();

    let log_dir = Config::default().data_dir().ok();
    let _guard = init_tracing(log_dir.as_deref().and_then(usable_log_dir));
    info!("sessionkit starting");

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let action = Action::from_matches(&matches)?;
    let api_url = matches.get_one::<String>("api-url").cloned();

    let code = actions::run(action, config, api_url).await?;
    info!("sessionkit finished");
    Ok(code)
}
