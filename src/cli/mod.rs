//! CLI module for nepsum
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `summarize` - Summarize one article and print the scores
//! - `session` - Interactive session with a rolling history of results
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Summarize an article by URL
//! nepsum summarize --url https://www.onlinekhabar.com/2025/01/123456
//!
//! # Summarize pasted text from a file, long form, as JSON
//! nepsum summarize --file article.txt --length long --json
//!
//! # Generate shell completions
//! nepsum completions bash > ~/.bash_completion.d/nepsum
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod session;
pub mod setup;
pub mod summarize;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::client::LengthPreference;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

/// nepsum - Nepali news summarizer client
#[derive(Parser, Debug)]
#[command(
    name = "nepsum",
    version,
    about = "Summarize Nepali news articles and compare them against a reference summary"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize one article
    Summarize(SummarizeArgs),
    /// Start an interactive session
    Session(SessionArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the service
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "nepsum.toml")]
    pub config: PathBuf,

    /// Override the summarization endpoint
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").multiple(false)))]
pub struct SummarizeArgs {
    /// News article URL for the service to fetch
    #[arg(short, long, group = "input")]
    pub url: Option<String>,

    /// Article text
    #[arg(short, long, group = "input")]
    pub text: Option<String>,

    /// Read article text from a file ("-" for stdin)
    #[arg(short, long, group = "input")]
    pub file: Option<PathBuf>,

    /// Summary length
    #[arg(short, long, value_enum)]
    pub length: Option<LengthPreference>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Initial summary length
    #[arg(short, long, value_enum)]
    pub length: Option<LengthPreference>,

    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "nepsum.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
