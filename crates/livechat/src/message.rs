//! Polled message stream.
//!
//! `System/Messages` returns a batch of `{type, message}` envelopes. Each
//! envelope is decoded in two steps: the shell first, keeping the payload as a
//! raw JSON value, then the payload into the variant named by `type`. Payloads
//! that are unknown or do not match their shape stay [`Message::Opaque`] so one
//! bad entry never drops the rest of the batch.

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Wire tags of the known message types.
pub mod message_type {
    pub const CHAT_REQUEST_SUCCESS: &str = "ChatRequestSuccess";
    pub const CHAT_REQUEST_FAIL: &str = "ChatRequestFail";
    pub const CHAT_ESTABLISHED: &str = "ChatEstablished";
    pub const CHAT_TRANSFERRED: &str = "ChatTransferred";
    pub const CHAT_MESSAGE: &str = "ChatMessage";
    pub const CHAT_ENDED: &str = "ChatEnded";
    pub const QUEUE_UPDATE: &str = "QueueUpdate";
    pub const AGENT_TYPING: &str = "AgentTyping";
    pub const AGENT_NOT_TYPING: &str = "AgentNotTyping";
    pub const AGENT_DISCONNECT: &str = "AgentDisconnect";
    pub const FILE_TRANSFER: &str = "FileTransfer";
    pub const NEW_VISITOR_BREADCRUMB: &str = "NewVisitorBreadcrumb";
    pub const CUSTOM_EVENT: &str = "CustomEvent";

    /// Every tag this crate decodes into a typed payload.
    pub const ALL: [&str; 13] = [
        CHAT_REQUEST_SUCCESS,
        CHAT_REQUEST_FAIL,
        CHAT_ESTABLISHED,
        CHAT_TRANSFERRED,
        CHAT_MESSAGE,
        CHAT_ENDED,
        QUEUE_UPDATE,
        AGENT_TYPING,
        AGENT_NOT_TYPING,
        AGENT_DISCONNECT,
        FILE_TRANSFER,
        NEW_VISITOR_BREADCRUMB,
        CUSTOM_EVENT,
    ];
}

use message_type as tag;

// ─────────────────────────────────────────────────────────────────────────────
// Batch
// ─────────────────────────────────────────────────────────────────────────────

/// One poll's worth of messages.
///
/// A `null` in any field reads as the field's default, so `{"messages": null}`
/// is an empty batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    /// Messages in server order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Message>,
    /// Server-side sequence of this batch.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequence: i64,
    /// Server-side offset of this batch.
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: i64,
}

impl Messages {
    /// Whether the poll returned nothing.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Wire tags of the batch, in order.
    pub fn message_types(&self) -> Vec<&str> {
        self.messages.iter().map(Message::message_type).collect()
    }

    /// Whether any message carries `message_type`.
    pub fn contains(&self, message_type: &str) -> bool {
        self.messages
            .iter()
            .any(|m| m.message_type() == message_type)
    }
}

/// Read an explicit `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Envelope
// ─────────────────────────────────────────────────────────────────────────────

/// A single polled event.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The chat request was queued.
    ChatRequestSuccess(ChatRequestSuccess),
    /// The chat request was refused.
    ChatRequestFail(ChatRequestFail),
    /// An agent accepted the chat.
    ChatEstablished(ChatEstablished),
    /// The chat moved to another agent.
    ChatTransferred(ChatTransferred),
    /// Text from the agent.
    ChatMessage(ChatMessage),
    /// The agent or the server ended the chat.
    ChatEnded(ChatEnded),
    /// New queue position.
    QueueUpdate(QueueUpdate),
    /// The agent started typing.
    AgentTyping(Agent),
    /// The agent stopped typing.
    AgentNotTyping(Agent),
    /// The agent lost its connection. The chat itself stays open.
    AgentDisconnect(Agent),
    /// File upload offer or status.
    FileTransfer(FileTransfer),
    /// The visitor navigated to a new page.
    NewVisitorBreadcrumb(NewVisitorBreadcrumb),
    /// Application-defined event.
    CustomEvent(CustomEvent),
    /// Unknown type, or a payload that did not fit its type. Kept as received.
    Opaque {
        /// Wire tag as received, empty when the envelope had none.
        message_type: String,
        /// Raw `message` value.
        payload: Value,
    },
}

impl Message {
    /// Decode a payload into the variant selected by `message_type`.
    ///
    /// `null` members of the payload take their default value, the same as
    /// absent ones.
    pub fn from_parts(message_type: impl Into<String>, payload: Value) -> Self {
        let message_type = message_type.into();

        // Typed payloads are JSON objects; anything else is passed through.
        if !payload.is_object() {
            return Self::Opaque {
                message_type,
                payload,
            };
        }

        let decoded = match message_type.as_str() {
            tag::CHAT_REQUEST_SUCCESS => typed(&payload).map(Self::ChatRequestSuccess),
            tag::CHAT_REQUEST_FAIL => typed(&payload).map(Self::ChatRequestFail),
            tag::CHAT_ESTABLISHED => typed(&payload).map(Self::ChatEstablished),
            tag::CHAT_TRANSFERRED => typed(&payload).map(Self::ChatTransferred),
            tag::CHAT_MESSAGE => typed(&payload).map(Self::ChatMessage),
            tag::CHAT_ENDED => typed(&payload).map(Self::ChatEnded),
            tag::QUEUE_UPDATE => typed(&payload).map(Self::QueueUpdate),
            tag::AGENT_TYPING => typed(&payload).map(Self::AgentTyping),
            tag::AGENT_NOT_TYPING => typed(&payload).map(Self::AgentNotTyping),
            tag::AGENT_DISCONNECT => typed(&payload).map(Self::AgentDisconnect),
            tag::FILE_TRANSFER => typed(&payload).map(Self::FileTransfer),
            tag::NEW_VISITOR_BREADCRUMB => typed(&payload).map(Self::NewVisitorBreadcrumb),
            tag::CUSTOM_EVENT => typed(&payload).map(Self::CustomEvent),
            _ => {
                return Self::Opaque {
                    message_type,
                    payload,
                };
            }
        };

        decoded.unwrap_or_else(|e| {
            tracing::debug!(%message_type, error = %e, "Keeping message payload undecoded");
            Self::Opaque {
                message_type,
                payload,
            }
        })
    }

    /// The wire tag of this message.
    pub fn message_type(&self) -> &str {
        match self {
            Self::ChatRequestSuccess(_) => tag::CHAT_REQUEST_SUCCESS,
            Self::ChatRequestFail(_) => tag::CHAT_REQUEST_FAIL,
            Self::ChatEstablished(_) => tag::CHAT_ESTABLISHED,
            Self::ChatTransferred(_) => tag::CHAT_TRANSFERRED,
            Self::ChatMessage(_) => tag::CHAT_MESSAGE,
            Self::ChatEnded(_) => tag::CHAT_ENDED,
            Self::QueueUpdate(_) => tag::QUEUE_UPDATE,
            Self::AgentTyping(_) => tag::AGENT_TYPING,
            Self::AgentNotTyping(_) => tag::AGENT_NOT_TYPING,
            Self::AgentDisconnect(_) => tag::AGENT_DISCONNECT,
            Self::FileTransfer(_) => tag::FILE_TRANSFER,
            Self::NewVisitorBreadcrumb(_) => tag::NEW_VISITOR_BREADCRUMB,
            Self::CustomEvent(_) => tag::CUSTOM_EVENT,
            Self::Opaque { message_type, .. } => message_type,
        }
    }

    /// Whether the payload was left undecoded.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque { .. })
    }

    /// Whether this message closes the chat from the server side.
    ///
    /// `AgentDisconnect` is not terminal: the session is still open and the
    /// visitor ends it with `ChatEnd` as usual.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ChatRequestFail(_) | Self::ChatEnded(_))
    }
}

fn typed<T: DeserializeOwned>(payload: &Value) -> serde_json::Result<T> {
    T::deserialize(without_nulls(payload))
}

/// Copy of `value` with `null` object members removed, so they fall back to
/// the field defaults.
fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), without_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(without_nulls).collect()),
        other => other.clone(),
    }
}

/// The envelope shell, payload still undecoded.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    message_type: String,
    #[serde(default)]
    message: Value,
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::deserialize(deserializer)?;
        Ok(Self::from_parts(raw.message_type, raw.message))
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_struct("Message", 2)?;
        envelope.serialize_field("type", self.message_type())?;
        match self {
            Self::ChatRequestSuccess(m) => envelope.serialize_field("message", m)?,
            Self::ChatRequestFail(m) => envelope.serialize_field("message", m)?,
            Self::ChatEstablished(m) => envelope.serialize_field("message", m)?,
            Self::ChatTransferred(m) => envelope.serialize_field("message", m)?,
            Self::ChatMessage(m) => envelope.serialize_field("message", m)?,
            Self::ChatEnded(m) => envelope.serialize_field("message", m)?,
            Self::QueueUpdate(m) => envelope.serialize_field("message", m)?,
            Self::AgentTyping(m) | Self::AgentNotTyping(m) | Self::AgentDisconnect(m) => {
                envelope.serialize_field("message", m)?
            }
            Self::FileTransfer(m) => envelope.serialize_field("message", m)?,
            Self::NewVisitorBreadcrumb(m) => envelope.serialize_field("message", m)?,
            Self::CustomEvent(m) => envelope.serialize_field("message", m)?,
            Self::Opaque { payload, .. } => envelope.serialize_field("message", payload)?,
        }
        envelope.end()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// The chat request reached a queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatRequestSuccess {
    /// Milliseconds the visitor may stay idle before the request lapses.
    pub connection_timeout: i64,
    /// Estimated wait in seconds.
    pub estimated_wait_time: i64,
    /// Masking rules the visitor's text is subject to.
    pub sensitive_data_rules: Vec<SensitiveDataRule>,
    /// Whether the transcript will be saved.
    pub transcript_save_enabled: bool,
    /// Deployment URL.
    pub url: String,
    /// Position in the queue, 1-based.
    pub queue_position: i64,
    /// Pre-chat details as the server recorded them.
    pub custom_details: Vec<CustomDetail>,
    /// Visitor id assigned by the server.
    pub visitor_id: String,
    /// Where the server places the visitor.
    pub geo_location: GeoLocation,
}

/// A sensitive-data masking rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitiveDataRule {
    /// Rule id.
    pub id: String,
    /// Rule name.
    pub name: String,
}

/// Pre-chat detail echoed back by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomDetail {
    /// Form label.
    pub label: String,
    /// Submitted value.
    pub value: String,
    /// Transcript fields the value is saved to.
    pub transcript_fields: Vec<String>,
    /// Whether the agent sees the value.
    pub display_to_agent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeoLocation {
    pub organization: String,
    pub region: String,
    pub city: String,
    pub country_name: String,
    pub latitude: f64,
    pub country_code: String,
    pub longitude: f64,
}

/// The chat request was refused, e.g. no agent available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatRequestFail {
    /// Refusal reason, e.g. [`CHAT_REQUEST_FAIL_REASON_UNAVAILABLE`](crate::CHAT_REQUEST_FAIL_REASON_UNAVAILABLE).
    pub reason: String,
    /// Post-chat page, if the deployment has one.
    pub post_chat_url: String,
}

/// An agent accepted the chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatEstablished {
    /// Agent display name.
    pub name: String,
    /// Agent user id.
    pub user_id: String,
    /// Whether the agent sees the visitor's text before it is sent.
    pub sneak_peek_enabled: bool,
    /// Idle timeout applied to the visitor.
    pub chasitor_idle_timeout: ChasitorIdleTimeout,
}

/// Visitor idle timeout settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChasitorIdleTimeout {
    /// Whether the timeout is active.
    pub is_enabled: bool,
    /// Seconds of idleness before a warning.
    pub warning_time: i64,
    /// Seconds of idleness before the chat ends.
    pub timeout: i64,
}

/// The chat moved to another agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatTransferred {
    /// New agent display name.
    pub name: String,
    /// New agent user id.
    pub user_id: String,
    /// Whether the new agent sees the visitor's text before it is sent.
    pub sneak_peek_enabled: bool,
}

/// Text sent by the agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatMessage {
    /// Message text.
    pub text: String,
    /// Agent display name.
    pub name: String,
    /// Delivery schedule.
    pub schedule: Schedule,
    /// Agent id.
    pub agent_id: String,
}

/// Delivery schedule of an agent message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schedule {
    pub response_delay_milliseconds: f64,
}

/// The agent ended the chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatEnded {
    /// Records the agent attached to the chat.
    pub attached_records: Vec<AttachedRecord>,
    /// End reason, e.g. `agent`.
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttachedRecord {
    pub field_value: String,
    pub field_name: String,
}

/// New queue position while waiting for an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueueUpdate {
    /// Estimated wait in seconds.
    pub estimated_wait_time: i64,
    /// Position in the queue, 1-based.
    pub position: i64,
}

/// Payload of the agent typing and disconnect signals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Agent {
    /// Agent display name.
    pub name: String,
    /// Agent id.
    pub agent_id: String,
}

/// The agent offered or cancelled a file upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileTransfer {
    /// Where to upload the file.
    pub upload_servlet_url: String,
    /// Token authorizing the upload.
    pub file_token: String,
    /// Content delivery servlet.
    pub cdm_servlet_url: String,
    /// `Requested`, `Canceled`, `Success` or `Failure`.
    #[serde(rename = "type")]
    pub transfer_type: String,
}

/// The visitor moved to another page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewVisitorBreadcrumb {
    /// Page URL.
    pub location: String,
}

/// Application-defined event sent by the agent console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomEvent {
    /// Event name (wire key `type`).
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event data, as sent.
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(batch: Value) -> Messages {
        serde_json::from_value(batch).unwrap()
    }

    #[test]
    fn test_every_known_tag_is_typed() {
        let envelopes: Vec<Value> = tag::ALL
            .iter()
            .map(|t| json!({"type": t, "message": {}}))
            .collect();
        let batch = decode(json!({"messages": envelopes, "sequence": 3, "offset": 7}));

        assert_eq!(batch.sequence, 3);
        assert_eq!(batch.offset, 7);
        assert_eq!(batch.message_types(), tag::ALL.to_vec());
        assert!(batch.messages.iter().all(|m| !m.is_opaque()));
        assert!(matches!(batch.messages[7], Message::AgentTyping(_)));
        assert!(matches!(batch.messages[8], Message::AgentNotTyping(_)));
        assert!(matches!(batch.messages[9], Message::AgentDisconnect(_)));
    }

    #[test]
    fn test_typed_payload_fields() {
        let batch = decode(json!({
            "messages": [
                {
                    "type": "ChatRequestSuccess",
                    "message": {
                        "connectionTimeout": 150000,
                        "estimatedWaitTime": 8,
                        "sensitiveDataRules": [{"id": "0gb", "name": "SSN"}],
                        "transcriptSaveEnabled": false,
                        "url": "",
                        "queuePosition": 1,
                        "customDetails": [{
                            "label": "ContactId",
                            "value": "003",
                            "transcriptFields": ["ContactId__c"],
                            "displayToAgent": true
                        }],
                        "visitorId": "a5c2",
                        "geoLocation": {
                            "organization": "Acme",
                            "region": "CA",
                            "city": "San Francisco",
                            "countryName": "United States",
                            "latitude": 37.77,
                            "countryCode": "US",
                            "longitude": -122.41
                        }
                    }
                },
                {
                    "type": "ChatMessage",
                    "message": {
                        "text": "Hi, how can I help?",
                        "name": "Jane",
                        "schedule": {"responseDelayMilliseconds": 0.0},
                        "agentId": "005"
                    }
                },
                {
                    "type": "FileTransfer",
                    "message": {"type": "Requested", "fileToken": "tok"}
                }
            ]
        }));

        let Message::ChatRequestSuccess(success) = &batch.messages[0] else {
            panic!("expected ChatRequestSuccess, got {:?}", batch.messages[0]);
        };
        assert_eq!(success.connection_timeout, 150000);
        assert_eq!(success.queue_position, 1);
        assert_eq!(success.sensitive_data_rules[0].name, "SSN");
        assert_eq!(success.custom_details[0].transcript_fields, ["ContactId__c"]);
        assert_eq!(success.geo_location.country_code, "US");

        let Message::ChatMessage(text) = &batch.messages[1] else {
            panic!("expected ChatMessage, got {:?}", batch.messages[1]);
        };
        assert_eq!(text.text, "Hi, how can I help?");
        assert_eq!(text.agent_id, "005");

        let Message::FileTransfer(transfer) = &batch.messages[2] else {
            panic!("expected FileTransfer, got {:?}", batch.messages[2]);
        };
        assert_eq!(transfer.transfer_type, "Requested");
        assert_eq!(transfer.file_token, "tok");
        assert!(transfer.upload_servlet_url.is_empty());
    }

    #[test]
    fn test_unknown_tag_passes_through() {
        let payload = json!({"whatever": [1, 2, 3]});
        let batch = decode(json!({
            "messages": [
                {"type": "SomethingNew", "message": payload},
                {"type": "QueueUpdate", "message": {"position": 2, "estimatedWaitTime": 30}}
            ]
        }));

        assert_eq!(
            batch.messages[0],
            Message::Opaque {
                message_type: "SomethingNew".to_string(),
                payload,
            }
        );
        assert_eq!(
            batch.messages[1],
            Message::QueueUpdate(QueueUpdate {
                estimated_wait_time: 30,
                position: 2,
            })
        );
    }

    #[test]
    fn test_malformed_known_payload_stays_opaque() {
        let bad = json!({"position": "second"});
        let batch = decode(json!({
            "messages": [
                {"type": "QueueUpdate", "message": bad},
                {"type": "ChatEnded", "message": {"reason": "agent"}}
            ]
        }));

        assert_eq!(batch.messages[0].message_type(), "QueueUpdate");
        assert_eq!(
            batch.messages[0],
            Message::Opaque {
                message_type: "QueueUpdate".to_string(),
                payload: bad,
            }
        );
        assert!(matches!(&batch.messages[1], Message::ChatEnded(e) if e.reason == "agent"));
    }

    #[test]
    fn test_non_object_payload_stays_opaque() {
        let batch = decode(json!({
            "messages": [
                {"type": "ChatMessage", "message": "plain text"},
                {"type": "AgentTyping", "message": [1]},
                {"type": "AgentNotTyping"}
            ]
        }));

        assert!(batch.messages.iter().all(Message::is_opaque));
        assert!(matches!(
            &batch.messages[2],
            Message::Opaque { payload: Value::Null, .. }
        ));
    }

    #[test]
    fn test_envelope_shell_failure_fails_batch() {
        let result = serde_json::from_value::<Messages>(json!({"messages": "nope"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_batch_defaults() {
        let batch = decode(json!({}));
        assert!(batch.is_empty());
        assert_eq!(batch.sequence, 0);
        assert!(!batch.contains(tag::CHAT_ESTABLISHED));
    }

    #[test]
    fn test_serialize_keeps_envelope_shape() {
        let opaque = json!({"type": "SomethingNew", "message": {"x": 1}});
        let typed = json!({"type": "NewVisitorBreadcrumb", "message": {"location": "/pricing"}});
        let batch = decode(json!({"messages": [opaque.clone(), typed.clone()]}));

        let encoded = serde_json::to_value(&batch).unwrap();
        assert_eq!(encoded["messages"][0], opaque);
        assert_eq!(encoded["messages"][1], typed);
    }

    #[test]
    fn test_terminal_messages() {
        assert!(Message::ChatEnded(ChatEnded::default()).is_terminal());
        assert!(Message::ChatRequestFail(ChatRequestFail::default()).is_terminal());
        assert!(!Message::ChatEstablished(ChatEstablished::default()).is_terminal());
        assert!(!Message::AgentDisconnect(Agent::default()).is_terminal());
    }

    #[test]
    fn test_null_batch_fields_read_as_empty() {
        let batch = decode(json!({"messages": null, "sequence": null, "offset": null}));
        assert!(batch.is_empty());
        assert_eq!(batch.sequence, 0);
        assert_eq!(batch.offset, 0);
    }

    #[test]
    fn test_null_payload_fields_keep_typed_variant() {
        let batch = decode(json!({
            "messages": [
                {"type": "ChatMessage", "message": {"text": "Hi", "name": null, "schedule": null}},
                {
                    "type": "ChatRequestSuccess",
                    "message": {
                        "queuePosition": 2,
                        "sensitiveDataRules": null,
                        "geoLocation": {"city": null, "countryCode": "US"}
                    }
                },
                {"type": null, "message": {"x": 1}}
            ]
        }));

        assert_eq!(
            batch.messages[0],
            Message::ChatMessage(ChatMessage {
                text: "Hi".to_string(),
                ..Default::default()
            })
        );

        let Message::ChatRequestSuccess(success) = &batch.messages[1] else {
            panic!("expected ChatRequestSuccess, got {:?}", batch.messages[1]);
        };
        assert_eq!(success.queue_position, 2);
        assert!(success.sensitive_data_rules.is_empty());
        assert!(success.geo_location.city.is_empty());
        assert_eq!(success.geo_location.country_code, "US");

        assert_eq!(batch.messages[2].message_type(), "");
        assert!(batch.messages[2].is_opaque());
    }
}
