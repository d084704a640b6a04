//! CLI command handlers.

pub mod chat;
pub mod session;

use std::time::Duration;

use anyhow::{Context as _, Result};
use livechat::LiveChatClient;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Live Agent endpoint.
    pub domain: Option<String>,
    /// API version header value.
    pub api_version: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build a client from the configured endpoint and version.
    pub fn client(&self) -> Result<LiveChatClient> {
        let domain = self
            .domain
            .as_deref()
            .context("no Live Agent endpoint configured; pass --domain or set LIVECHAT_DOMAIN")?;
        let api_version = self
            .api_version
            .as_deref()
            .context("no API version configured; pass --api-version or set LIVECHAT_VERSION")?;

        LiveChatClient::builder()
            .base_url(domain)
            .api_version(api_version)
            .timeout(self.timeout)
            .user_agent(format!("livechat-cli/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("invalid client configuration")
    }
}
