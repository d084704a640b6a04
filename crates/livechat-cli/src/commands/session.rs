//! Session command - create a session and show it.

use anyhow::{Context as _, Result};
use clap::Args;
use console::{Style, style};

use super::Context;

/// Arguments for the session command.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Show the session key and affinity token
    #[arg(long)]
    pub reveal: bool,
}

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let session = client
        .create_session()
        .await
        .context("failed to create session")?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    let secret = |value: &str| {
        if args.reveal {
            value.to_string()
        } else {
            format!("{}…", value.chars().take(8).collect::<String>())
        }
    };

    println!();
    println!("{}", style("Live Agent Session").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();
    println!("  {} {}", dim.apply_to("Id:"), session.id);
    println!("  {} {}", dim.apply_to("Key:"), secret(&session.key));
    println!(
        "  {} {}",
        dim.apply_to("Affinity:"),
        secret(&session.affinity_token)
    );
    println!(
        "  {} {}s",
        dim.apply_to("Poll timeout:"),
        session.client_poll_timeout
    );
    println!();

    Ok(())
}
