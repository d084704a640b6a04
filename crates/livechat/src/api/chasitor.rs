//! Chasitor API.

use super::{PATH_CHASITOR_INIT, PATH_CHAT_END, PATH_CHAT_MESSAGE};
use crate::client::LiveChatClient;
use crate::error::Result;
use crate::header::Header;
use crate::types::{ChasitorInit, EndChatRequest, SendMessageRequest};

/// Chasitor API client.
///
/// Every call here changes the remote chat, so each needs a fresh sequence
/// number in its [`Header`].
pub struct ChasitorApi {
    client: LiveChatClient,
}

impl ChasitorApi {
    pub(crate) fn new(client: LiveChatClient) -> Self {
        Self { client }
    }

    /// Request a chat for the visitor.
    pub async fn init(&self, header: &Header, init: &ChasitorInit) -> Result<()> {
        self.client.post(PATH_CHASITOR_INIT, header, init).await
    }

    /// Send a visitor message.
    pub async fn chat_message(&self, header: &Header, request: &SendMessageRequest) -> Result<()> {
        self.client.post(PATH_CHAT_MESSAGE, header, request).await
    }

    /// End the chat.
    pub async fn chat_end(&self, header: &Header, request: &EndChatRequest) -> Result<()> {
        self.client.post(PATH_CHAT_END, header, request).await
    }
}
