//! Command-line interface for cinerelay.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cinerelay - TMDB relay service
#[derive(Debug, Parser)]
#[command(name = "cinerelay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config.toml (defaults to ./config.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Port to listen on, overrides PORT and the config file
    #[arg(long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Commands {
    /// Run the HTTP relay (default)
    Serve,

    /// Print the effective configuration and validate it
    CheckConfig,
}
