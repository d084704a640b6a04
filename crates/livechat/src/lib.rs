//! HTTP client SDK for the Live Agent chat REST API.
//!
//! The client issues the five visitor-side calls of a chat (session, chat
//! request, message polling, sending, ending) and decodes the polled message
//! stream into typed events.
//!
//! # Example
//!
//! ```no_run
//! use livechat::{ChasitorInit, Header, LiveChatClient, Message, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = LiveChatClient::new("https://d.la1-c1-ukb.salesforceliveagent.com", "64")?;
//!
//! let session = client.create_session().await?;
//! let mut header = Header::for_session(&session);
//!
//! let init = ChasitorInit::new("00D...", "572...", "573...", &session.id)
//!     .with_visitor_name("Ryan P");
//! client.init_chasitor(&header, &init).await?;
//!
//! header.advance();
//! client.send_message(&header, "Hello world").await?;
//!
//! // The caller owns the poll loop.
//! loop {
//!     let batch = client.list_messages(&header).await?;
//!     for message in &batch.messages {
//!         match message {
//!             Message::ChatEstablished(agent) => println!("{} joined", agent.name),
//!             Message::ChatMessage(m) => println!("{}: {}", m.name, m.text),
//!             other => println!("[{}]", other.message_type()),
//!         }
//!     }
//!     if batch.messages.iter().any(Message::is_terminal) {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Headers
//!
//! Session state is never kept in the client. Build a [`Header`] from the
//! session and call [`Header::advance`] before each request that changes the
//! chat; the sequence must never repeat.

pub mod api;
pub mod client;
pub mod error;
pub mod header;
pub mod message;
pub mod types;

pub use client::{ClientBuilder, LiveChatClient};
pub use error::{Error, Result};
pub use header::Header;
pub use message::*;
pub use types::*;
