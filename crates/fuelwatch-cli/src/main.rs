use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fuelwatch", version, about = "Structure fuel status reports for Discord")]
struct Cli {
    /// Config file (default: ~/.config/fuelwatch/config.toml)
    #[arg(long, global = true, env = "FUELWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and deliver fuel reports
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Webhook management
    Webhook {
        #[command(subcommand)]
        action: commands::webhook::WebhookAction,
    },
    /// Print the current UTC time in the report label format
    Timestamp,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = commands::Context::new(cli.config);
    let result = match cli.command {
        Commands::Report { action } => commands::report::run(action, &ctx),
        Commands::Config { action } => commands::config::run(action, &ctx),
        Commands::Webhook { action } => commands::webhook::run(action, &ctx),
        Commands::Timestamp => commands::timestamp::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
