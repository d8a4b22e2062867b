//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MiniSocial feed client
#[derive(Parser, Debug)]
#[command(name = "minisocial-feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config and MINISOCIAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session token sent as a bearer credential
    #[arg(long, global = true, env = "MINISOCIAL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Posts per page (overrides config and MINISOCIAL_PAGE_SIZE)
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page of the feed
    Page {
        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        index: u32,
    },

    /// Load the feed page by page, as scrolling would
    Browse {
        /// Stop after this many pages
        #[arg(long, default_value = "5")]
        max_pages: u32,

        /// Fetch the first page before building the feed and hand it over as a seed
        #[arg(long)]
        prefetch: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Indented JSON
    Pretty,
}
