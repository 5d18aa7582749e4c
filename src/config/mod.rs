pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "freelancer-fetch")]
#[command(about = "Fetch users and projects from the Freelancer API")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override `api.base_url` from the config file
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up a user and their latest projects
    User { id: i64 },

    /// Search active projects
    Search {
        query: String,

        #[arg(long, default_value = "10")]
        limit: u32,

        #[arg(long, default_value = "0")]
        offset: u32,

        /// Print lowercased descriptions only
        #[arg(long)]
        descriptions: bool,
    },
}
