/// Logging setup.
///
/// The terminal UI owns stdout, so log lines go to a file
/// (`[log] file` in config.toml) at the configured level.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::Level;

use gridchase::config::LogConfig;

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("bad log level '{level}'")]
    BadLevel { level: String },
    #[error("could not create {}: {source}", path.display())]
    CreateFile { path: PathBuf, source: io::Error },
    #[error("subscriber already installed: {0}")]
    Install(String),
}

pub fn init(cfg: &LogConfig) -> Result<(), LogInitError> {
    let level = parse_level(&cfg.level)?;
    let file = File::create(&cfg.file)
        .map_err(|source| LogInitError::CreateFile { path: cfg.file.clone(), source })?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| LogInitError::Install(e.to_string()))
}

fn parse_level(level: &str) -> Result<Level, LogInitError> {
    level.parse().map_err(|_| LogInitError::BadLevel { level: level.to_string() })
}
