//! Tracing setup for the sidecar.
//!
//! stdout carries the IPC protocol, so all log output goes to stderr. The
//! filter is read from `GRADEBOOKD_LOG` (same syntax as `RUST_LOG`).

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

pub const LOG_ENV_VAR: &str = "GRADEBOOKD_LOG";
const DEFAULT_FILTER: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub fn init() -> Result<(), LoggingError> {
    let filter = build_env_filter();
    let stderr_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(std::io::stderr);

    let subscriber = Registry::default().with(filter).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
