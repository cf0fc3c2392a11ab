//! rolo - Terminal user directory
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use rolo::cli::{Cli, Commands};
use rolo::config::ConfigManager;
use rolo::error::RoloResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RoloResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("rolo=warn"),
        1 => EnvFilter::new("rolo=info"),
        _ => EnvFilter::new("rolo=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    // Dispatch to command
    match cli.command {
        Commands::List(args) => rolo::cli::commands::list(args, &config).await,
        Commands::Add(args) => rolo::cli::commands::add(args, &config).await,
        Commands::Edit(args) => rolo::cli::commands::edit(args, &config).await,
        Commands::Delete(args) => rolo::cli::commands::delete(args, &config).await,
        Commands::Search(args) => rolo::cli::commands::search(args, &config).await,
        Commands::Sync => rolo::cli::commands::sync(&config).await,
        Commands::Config(args) => rolo::cli::commands::config(args, &config).await,
    }
}
