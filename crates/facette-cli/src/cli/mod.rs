use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;


pub use args::{SearchArgs, WebArgs};

#[derive(Debug, Parser)]
#[command(name = "facette")]
#[command(about = "Browse, search and summarize a Facette catalog", version)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON data file seeding the catalog and library.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the browse pages and the stats endpoint.
    Web(WebArgs),
    /// Print catalog and library cardinalities as JSON.
    Stats,
    /// Search sources and collections; prints matches as JSON.
    Search(SearchArgs),
}
