use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod clipboard;
mod commands;
mod config;
mod render;

use commands::{open_store, AddCommand, ConfigCommand, ListCommand, SessionCommand, ShareCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "glic")]
#[command(version)]
#[command(about = "Log glucose readings from the terminal", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a glucose reading
    Add(AddCommand),

    /// Show saved readings, most recent first
    List(ListCommand),

    /// Generate a share link
    Share(ShareCommand),

    /// Interactive session with calendar and share dialog
    Session(SessionCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glic=warn,glicemia_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;
    tracing::debug!("Data directory: {}", config.data_dir.value.display());

    match cli.command {
        Some(Commands::Add(cmd)) => {
            let mut store = open_store(&config);
            cmd.run(&mut store)?;
        }
        Some(Commands::List(cmd)) => {
            let store = open_store(&config);
            cmd.run(&store)?;
        }
        Some(Commands::Share(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Session(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
