use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lobby-gallery")]
#[command(author, version, about = "Browse historical lobby cards by decade")]
pub struct Cli {
    /// Path to a RON config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load and print the gallery for one or more decades
    Gallery {
        /// Decade anchor year (repeatable); defaults to the first decade
        #[arg(short, long = "year")]
        years: Vec<i32>,

        /// Load every decade on the timeline
        #[arg(long, conflicts_with = "years")]
        all: bool,

        /// Maximum cards per decade
        #[arg(short, long)]
        limit: Option<usize>,

        /// OMDb API key used to backfill posters
        #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
        omdb_key: Option<String>,

        /// Print galleries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the decade timeline
    Timeline,
}
