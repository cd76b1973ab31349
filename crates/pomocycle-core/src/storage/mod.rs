mod config;

pub use config::{Config, LoggingConfig, NotificationsConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/pomocycle[-dev]/` based on POMOCYCLE_ENV.
///
/// Set POMOCYCLE_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOCYCLE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomocycle-dev")
    } else {
        base_dir.join("pomocycle")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
