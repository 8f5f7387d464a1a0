use std::fs::OpenOptions;
use std::path::PathBuf;

use color_eyre::{Result, eyre::WrapErr};
use env_logger::{Builder, Env, Target};

pub const LOG_ENV: &str = "GHOST_SHOOTER_LOG";
pub const DEFAULT_LOG_FILE: &str = "ghost_shooter.log";

/// Log file from `GHOST_SHOOTER_LOG`, or the default next to the binary
pub fn log_path_from_env() -> PathBuf {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

/// Sends `log` output to a file, since the terminal belongs to the game.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init() -> Result<PathBuf> {
    let path = log_path_from_env();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .wrap_err("failed to install logger")?;

    Ok(path)
}
