//! livechat-cli - drive a Live Agent deployment from the terminal.
//!
//! Main entry point for the command-line tool.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod commands;
mod output;

use commands::{chat, session};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// livechat-cli - Live Agent chat client
#[derive(Parser)]
#[command(name = "livechat-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Live Agent endpoint, e.g. https://d.la1-c1-ukb.salesforceliveagent.com
    #[arg(long, global = true, env = "LIVECHAT_DOMAIN")]
    pub domain: Option<String>,

    /// Live Agent API version
    #[arg(long, global = true, env = "LIVECHAT_VERSION")]
    pub api_version: Option<String>,

    /// Per-request timeout in seconds (must exceed the server poll timeout)
    #[arg(long, global = true, env = "LIVECHAT_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Also write JSON logs to daily-rotated files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a session and print it
    Session(session::SessionArgs),

    /// Run a scripted chat: request an agent, send messages, end the chat
    Chat(chat::ChatArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: console (human-readable) + optional rotating JSON file
    let filter = if cli.verbose {
        "livechat=debug,livechat_cli=debug,info"
    } else {
        "livechat=info,livechat_cli=info,warn"
    };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let (file_layer, _guard) = match &cli.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "livechat.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new("livechat=trace,livechat_cli=trace,info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .with(file_layer)
        .init();

    // Create context for commands
    let ctx = commands::Context {
        domain: cli.domain,
        api_version: cli.api_version,
        timeout: Duration::from_secs(cli.timeout_secs),
        json_output: cli.json,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Session(args) => session::run(args, &ctx).await,
        Commands::Chat(args) => chat::run(args, &ctx).await,
    }
}
