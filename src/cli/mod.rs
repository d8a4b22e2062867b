//! CLI module
//!
//! Command-line front end for the feed client.
//!
//! # Commands
//!
//! - `page` - Fetch a single feed page
//! - `browse` - Scroll through the feed the way a reader would

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
