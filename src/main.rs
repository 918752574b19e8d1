use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use ecoquest::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "ecoquest")]
#[command(about = "EcoQuest - environmental lessons and quizzes with XP rewards")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.ecoquest/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Insert the sample lessons and quizzes
    Seed,

    /// Manage users and their sessions
    User {
        #[command(subcommand)]
        command: cli::user::UserCommands,
    },

    /// Show a user's XP and completions
    Status {
        /// Username to report on
        username: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Init { force }) => {
            cli::init::init_command(cli.config, force)?;
        }
        Some(Commands::Serve { port }) => {
            let mut config = load_config(cli.config.as_deref(), cli.db)?;
            if let Some(port) = port {
                config.settings.server.port = port;
            }
            cli::serve::serve_command(&config)?;
        }
        Some(Commands::Seed) => {
            let config = load_config(cli.config.as_deref(), cli.db)?;
            cli::seed::seed_command(&config)?;
        }
        Some(Commands::User { command }) => {
            let config = load_config(cli.config.as_deref(), cli.db)?;
            cli::user::user_command(&config, command)?;
        }
        Some(Commands::Status { username }) => {
            let config = load_config(cli.config.as_deref(), cli.db)?;
            cli::status::status_command(&config, &username)?;
        }
        None => {
            // Default: run the server
            let config = load_config(cli.config.as_deref(), cli.db)?;
            cli::serve::serve_command(&config)?;
        }
    }

    Ok(())
}

/// Load the config file and apply the `--db` override
fn load_config(config_path: Option<&Path>, db: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load(config_path)?;
    if let Some(db) = db {
        config.settings.database_path = Some(db);
    }
    Ok(config)
}
