use clap::Subcommand;
use fuelwatch_core::Config;

use super::Context;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "report.title", "notify.webhook_url")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value (JSON for lists, e.g. '["Pilot A"]')
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = ctx.load_config()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = ctx.load_config()?;
            config.set(&key, &value)?;
            config.save_to(&ctx.config_path()?)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = ctx.load_config()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            Config::default().save_to(&ctx.config_path()?)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", ctx.config_path()?.display());
        }
    }
    Ok(())
}
