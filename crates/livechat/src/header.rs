//! Session-affinity header context.
//!
//! Every call after session creation carries the affinity token, the session
//! key and a sequence number. The client never stores these: callers keep a
//! [`Header`] per chat and advance its sequence between requests.

use std::num::NonZeroU64;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Error, Result};
use crate::types::Session;

/// API version header, sent on every request.
pub const HEADER_VERSION: &str = "X-LIVEAGENT-API-VERSION";
/// Affinity routing header, sent on every request.
pub const HEADER_AFFINITY: &str = "X-LIVEAGENT-AFFINITY";
/// Session key header, sent once a session exists.
pub const HEADER_SESSION_KEY: &str = "X-LIVEAGENT-SESSION-KEY";
/// Request sequence header.
pub const HEADER_SEQUENCE: &str = "X-LIVEAGENT-SEQUENCE";

/// Affinity value the service expects before a token has been issued.
pub const NULL_AFFINITY: &str = "null";

// `HeaderName::from_static` only accepts lowercase names.
const NAME_VERSION: HeaderName = HeaderName::from_static("x-liveagent-api-version");
const NAME_AFFINITY: HeaderName = HeaderName::from_static("x-liveagent-affinity");
const NAME_SESSION_KEY: HeaderName = HeaderName::from_static("x-liveagent-session-key");
const NAME_SEQUENCE: HeaderName = HeaderName::from_static("x-liveagent-sequence");

/// Per-chat header context.
///
/// # Example
///
/// ```
/// use livechat::{Header, Session};
///
/// let session = Session {
///     key: "key".into(),
///     id: "id".into(),
///     client_poll_timeout: 40,
///     affinity_token: "affinity".into(),
/// };
///
/// let mut header = Header::for_session(&session);
/// assert_eq!(header.sequence(), Some(1));
///
/// header.advance();
/// assert_eq!(header.sequence(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Affinity token. Sent as `"null"` when absent.
    pub affinity: Option<String>,
    /// Session key. Omitted when absent.
    pub session_key: Option<String>,
    /// Sequence number. Omitted when absent.
    pub sequence: Option<NonZeroU64>,
}

impl Header {
    /// Create an empty header (no affinity, no session key, no sequence).
    pub fn new() -> Self {
        Self::default()
    }

    /// Header for the first request after `session` was created.
    pub fn for_session(session: &Session) -> Self {
        Self {
            affinity: non_empty(&session.affinity_token),
            session_key: non_empty(&session.key),
            sequence: Some(NonZeroU64::MIN),
        }
    }

    /// Set the affinity token.
    pub fn with_affinity(mut self, affinity: impl Into<String>) -> Self {
        self.affinity = Some(affinity.into());
        self
    }

    /// Set the session key.
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = Some(key.into());
        self
    }

    /// Set the sequence number. Zero means "no sequence".
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = NonZeroU64::new(sequence);
        self
    }

    /// Current sequence number, if any.
    pub fn sequence(&self) -> Option<u64> {
        self.sequence.map(NonZeroU64::get)
    }

    /// Move to the next sequence number (1 if none was set).
    pub fn advance(&mut self) -> &mut Self {
        self.sequence = Some(match self.sequence {
            Some(current) => current.saturating_add(1),
            None => NonZeroU64::MIN,
        });
        self
    }

    /// Copy of this header with the sequence advanced by one.
    pub fn next(&self) -> Self {
        let mut next = self.clone();
        next.advance();
        next
    }

    /// Encode the protocol headers for a request.
    pub fn to_header_map(&self, version: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(NAME_VERSION, value(HEADER_VERSION, version)?);

        let affinity = self
            .affinity
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(NULL_AFFINITY);
        headers.insert(NAME_AFFINITY, value(HEADER_AFFINITY, affinity)?);

        if let Some(key) = self.session_key.as_deref().filter(|k| !k.is_empty()) {
            headers.insert(NAME_SESSION_KEY, value(HEADER_SESSION_KEY, key)?);
        }

        if let Some(sequence) = self.sequence {
            headers.insert(NAME_SEQUENCE, HeaderValue::from(sequence.get()));
        }

        Ok(headers)
    }
}

fn value(name: &'static str, raw: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(raw).map_err(|e| Error::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
