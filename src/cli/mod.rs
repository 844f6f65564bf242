// src/cli/mod.rs — CLI definition (clap derive)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cvxserve", about = "Convex optimization solve service", version)]
pub struct Cli {
    /// Config file path (defaults to ./cvxserve.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the listen port from config
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the cache database path from config
    #[arg(long)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP solve service (default when no subcommand given)
    Serve,
    /// Create the cache database and apply pending migrations
    Migrate,
    /// Print the canonical hash of a problem JSON file without solving
    Hash {
        /// Path to a JSON problem payload
        file: PathBuf,
    },
}
