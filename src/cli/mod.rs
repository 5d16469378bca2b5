pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tributary")]
#[command(about = "Offline-tolerant image feed loader", long_about = None)]
pub struct Cli {
    /// Path to a config file (default: ~/.config/tributary/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use a throwaway in-memory cache instead of the SQLite database
    #[arg(long, global = true)]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the feed, falling back to the local cache when offline
    Feed {
        /// Number of pages to load (at least 1)
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        pages: u64,
    },
    /// Load the comments of a feed image
    Comments {
        /// Id of the feed image
        image_id: Uuid,
    },
    /// Load image data, from the cache when available
    Image {
        /// URL of the image
        url: url::Url,

        /// Write the image data to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete the cached feed if it has expired
    Validate,
}
