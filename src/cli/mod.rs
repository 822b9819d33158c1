//! CLI module for Profchat.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Profchat - Professor Matching Chat Assistant
///
/// A retrieval-augmented chat service for finding professors from student reviews.
#[derive(Parser, Debug)]
#[command(name = "profchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check environment and configuration
    Doctor,

    /// Ask a one-shot question directly against the providers
    Ask {
        /// The question to ask
        question: String,

        /// Chat model to use for response generation
        #[arg(short, long)]
        model: Option<String>,

        /// Number of reviews to retrieve for context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Start an interactive chat session against a running answer service
    Chat {
        /// Answer service URL (defaults to client.server_url from config)
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Start the HTTP answer service
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "index.host")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
