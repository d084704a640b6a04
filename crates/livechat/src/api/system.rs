//! System API.

use super::{PATH_MESSAGES, PATH_SESSION_ID};
use crate::client::LiveChatClient;
use crate::error::{Error, Result};
use crate::header::Header;
use crate::message::Messages;
use crate::types::Session;

/// System API client.
pub struct SystemApi {
    client: LiveChatClient,
}

impl SystemApi {
    pub(crate) fn new(client: LiveChatClient) -> Self {
        Self { client }
    }

    /// Create a new session.
    ///
    /// No session exists yet, so only the version and a `"null"` affinity are
    /// sent.
    pub async fn session_id(&self) -> Result<Session> {
        let session: Session = self.client.get(PATH_SESSION_ID, &Header::new()).await?;

        if let Err(field) = session.validate() {
            return Err(Error::Protocol(format!(
                "session response is missing '{}'",
                field
            )));
        }

        tracing::debug!(
            session_id = %session.id,
            poll_timeout = session.client_poll_timeout,
            "Created Live Agent session"
        );
        Ok(session)
    }

    /// Poll for messages.
    pub async fn messages(&self, header: &Header) -> Result<Messages> {
        let batch: Messages = self.client.get(PATH_MESSAGES, header).await?;

        tracing::debug!(
            count = batch.messages.len(),
            sequence = batch.sequence,
            "Received Live Agent messages"
        );
        Ok(batch)
    }
}
