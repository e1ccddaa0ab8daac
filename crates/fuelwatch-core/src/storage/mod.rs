mod config;

pub use config::{Config, NotifyConfig, ReportConfig, SourceConfig};

use std::path::PathBuf;

/// Returns `~/.config/fuelwatch[-dev]/` based on FUELWATCH_ENV.
///
/// Set FUELWATCH_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FUELWATCH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fuelwatch-dev")
    } else {
        base_dir.join("fuelwatch")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
