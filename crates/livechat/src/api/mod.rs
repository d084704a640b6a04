//! API endpoint implementations.

mod chasitor;
mod system;

pub use chasitor::ChasitorApi;
pub use system::SystemApi;

/// `GET`: issue a new session.
pub const PATH_SESSION_ID: &str = "chat/rest/System/SessionId";
/// `GET`: poll for messages.
pub const PATH_MESSAGES: &str = "chat/rest/System/Messages";
/// `POST`: request a chat.
pub const PATH_CHASITOR_INIT: &str = "chat/rest/Chasitor/ChasitorInit";
/// `POST`: send visitor text.
pub const PATH_CHAT_MESSAGE: &str = "chat/rest/Chasitor/ChatMessage";
/// `POST`: end the chat.
pub const PATH_CHAT_END: &str = "chat/rest/Chasitor/ChatEnd";
