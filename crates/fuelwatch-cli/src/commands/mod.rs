pub mod config;
pub mod report;
pub mod timestamp;
pub mod webhook;

use std::path::PathBuf;

use fuelwatch_core::Config;

/// Settings shared by every subcommand.
pub struct Context {
    config_path: Option<PathBuf>,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::path()?),
        }
    }

    pub fn load_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        Ok(Config::load_from(&self.config_path()?)?)
    }
}
