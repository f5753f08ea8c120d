//! echest CLI
//!
//! Command-line tools for inspecting and editing stored containers.
//!
//! # Commands
//!
//! - `inspect` - Display a container's size and contents
//! - `resize` - Set a container's size in rows
//! - `upgrade` - Grow a container by one or more rows

mod commands;

use clap::{Parser, Subcommand};
use echest_core::{ChestManager, Config};
use echest_storage::EntityId;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// echest container storage tools.
#[derive(Parser)]
#[command(name = "echest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(global = true, short, long)]
    config: Option<PathBuf>,

    /// Backend kind (file, sqlite, mysql, mongodb, memory)
    #[arg(global = true, short, long)]
    backend: Option<String>,

    /// Connection URI for relational backends
    #[arg(global = true, short, long)]
    uri: Option<String>,

    /// Directory of the file backend
    #[arg(global = true, short, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a container's size and contents
    Inspect {
        /// Entity id (UUID)
        id: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Set a container's size in rows (1 to 6)
    Resize {
        /// Entity id (UUID)
        id: String,

        /// New size in rows
        rows: u32,
    },

    /// Grow a container by whole rows
    Upgrade {
        /// Entity id (UUID)
        id: String,

        /// Rows to add
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },

    /// Show version information
    Version,
}

impl Cli {
    fn load_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::new(),
        };
        if let Some(kind) = &self.backend {
            config = config.base_type(kind.as_str());
        }
        if let Some(uri) = &self.uri {
            config = config.connection_uri(uri.as_str());
        }
        if let Some(dir) = &self.data_dir {
            config = config.data_dir(dir.clone());
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Version = cli.command {
        println!("echest CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("echest core v{}", echest_core::VERSION);
        return Ok(());
    }

    let config = cli.load_config()?;
    let manager = ChestManager::from_config(&config);

    match &cli.command {
        Commands::Inspect { id, format } => {
            commands::inspect::run(&manager, &id.parse::<EntityId>()?, format)?;
        }
        Commands::Resize { id, rows } => {
            commands::resize::run(&manager, &id.parse::<EntityId>()?, *rows)?;
        }
        Commands::Upgrade { id, count } => {
            commands::upgrade::run(&manager, &id.parse::<EntityId>()?, *count)?;
        }
        Commands::Version => {}
    }

    Ok(())
}
