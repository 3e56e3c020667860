mod client;
mod commands;
mod config;
mod models;
mod roster;
mod web;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use models::Config;

const DEFAULT_URL: &str = "http://localhost:8000";

/// Mergington High School activities: list activities, sign students up, withdraw them.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log at debug level
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the activities API server
    Serve {
        /// Path to config file (built-in Mergington activities when omitted)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Listen address, overrides the config (e.g. "127.0.0.1:8000")
        #[arg(short = 'a', long)]
        addr: Option<String>,
    },

    /// List every activity and its participants
    Activities {
        /// Base URL of a running server
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Sign a student up for an activity
    ///
    /// Example:
    ///   signup "Chess Club" new@mergington.edu
    Signup {
        /// Exact activity name
        activity: String,

        /// Student email (trimmed and lower-cased by the server)
        email: String,

        /// Base URL of a running server
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Withdraw a student from an activity
    Withdraw {
        /// Exact activity name
        activity: String,

        /// Student email
        email: String,

        /// Base URL of a running server
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match &cli.command {
        Command::Serve { config, addr } => {
            let cfg = match config {
                Some(path) => config::load_config(path)?,
                None => {
                    info!("No config file given, using built-in activities");
                    Config::default()
                }
            };
            let addr = addr.clone().unwrap_or_else(|| cfg.server.addr.clone());
            web::serve(cfg, &addr).await?;
        }
        Command::Activities { url } => {
            commands::run_list(url).await?;
        }
        Command::Signup {
            activity,
            email,
            url,
        } => {
            commands::run_signup(url, activity, email).await?;
        }
        Command::Withdraw {
            activity,
            email,
            url,
        } => {
            commands::run_withdraw(url, activity, email).await?;
        }
    }

    Ok(())
}
