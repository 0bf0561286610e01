//! Fondo Archival Records Kernel
//!
//! Plugin management CLI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fondo_kernel::config::Config;
use fondo_kernel::plugin;

#[derive(Parser)]
#[command(name = "fondo")]
#[command(about = "Fondo archival records kernel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plugin management commands.
    Plugin {
        #[command(subcommand)]
        command: PluginCommands,
    },
}

#[derive(Subcommand)]
enum PluginCommands {
    /// Print the resolved plugin load order.
    Order,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    // Load configuration from environment
    let config = Config::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Plugin { command } => match command {
            PluginCommands::Order => {
                plugin::cmd_plugin_order(&config.plugin_base_dir(), &config.plugins)
            }
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
