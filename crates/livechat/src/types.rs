//! Request and response types for the Live Agent REST API.
//!
//! Field names follow the service's camelCase JSON contract exactly.

use serde::{Deserialize, Serialize};

/// Reason reported in `ChatRequestFail` when no agent can take the chat.
pub const CHAT_REQUEST_FAIL_REASON_UNAVAILABLE: &str = "Unavailable";

/// Pre-chat field holding the case record id.
pub const FIELD_CASE_ID: &str = "CaseId";

/// Pre-chat field holding the contact record id.
pub const FIELD_CONTACT_ID: &str = "ContactId";

/// End reason for a chat closed by the visitor.
pub const END_REASON_CLIENT: &str = "client";

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// A chat session issued by `System/SessionId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session key, sent back in the session key header.
    #[serde(default)]
    pub key: String,
    /// Session id, sent back in `ChasitorInit.sessionId`.
    #[serde(default)]
    pub id: String,
    /// Seconds the server may hold a message poll open.
    #[serde(default)]
    pub client_poll_timeout: i64,
    /// Affinity token routing the session to one backend node.
    #[serde(default)]
    pub affinity_token: String,
}

impl Session {
    /// Check that the server issued every identifier the chat needs.
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.key.is_empty() {
            return Err("key");
        }
        if self.id.is_empty() {
            return Err("id");
        }
        if self.affinity_token.is_empty() {
            return Err("affinityToken");
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chasitor
// ─────────────────────────────────────────────────────────────────────────────

/// Visitor chat request sent to `Chasitor/ChasitorInit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChasitorInit {
    /// Salesforce organization id.
    pub organization_id: String,
    /// Chat deployment id.
    pub deployment_id: String,
    /// Chat button id.
    pub button_id: String,
    /// Agent to route to directly, empty for the button queue.
    pub agent_id: String,
    /// Fall back to the button queue when `agent_id` is unavailable.
    pub do_fallback: bool,
    /// Id from [`Session::id`].
    pub session_id: String,
    /// Visitor user agent.
    pub user_agent: String,
    /// Visitor language, e.g. `en-US`.
    pub language: String,
    /// Visitor screen resolution, e.g. `1920x1080`.
    pub screen_resolution: String,
    /// Name shown to the agent.
    pub visitor_name: String,
    /// Pre-chat form fields.
    pub prechat_details: Vec<PrechatDetail>,
    /// Record find/create rules over the pre-chat fields.
    pub prechat_entities: Vec<PrechatEntity>,
    /// Buttons or agents tried in order.
    pub button_overrides: Vec<String>,
    /// Ask for `QueueUpdate` messages while waiting.
    pub receive_queue_updates: bool,
    /// Whether this is a POST-style request.
    pub is_post: bool,
}

impl ChasitorInit {
    /// Start a request for the given deployment and button.
    ///
    /// Queue updates are requested and `isPost` is set; both are what a
    /// browser widget sends.
    pub fn new(
        organization_id: impl Into<String>,
        deployment_id: impl Into<String>,
        button_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            organization_id: organization_id.into(),
            deployment_id: deployment_id.into(),
            button_id: button_id.into(),
            session_id: session_id.into(),
            receive_queue_updates: true,
            is_post: true,
            ..Default::default()
        }
    }

    /// Route the chat to a specific agent, falling back to the button queue.
    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = agent_id.into();
        self.do_fallback = true;
        self
    }

    /// Set the visitor display name.
    pub fn with_visitor_name(mut self, name: impl Into<String>) -> Self {
        self.visitor_name = name.into();
        self
    }

    /// Set the user agent, language and screen resolution.
    pub fn with_client_info(
        mut self,
        user_agent: impl Into<String>,
        language: impl Into<String>,
        screen_resolution: impl Into<String>,
    ) -> Self {
        self.user_agent = user_agent.into();
        self.language = language.into();
        self.screen_resolution = screen_resolution.into();
        self
    }

    /// Append a pre-chat form field.
    pub fn with_detail(mut self, detail: PrechatDetail) -> Self {
        self.prechat_details.push(detail);
        self
    }

    /// Append an entity-linking rule.
    pub fn with_entity(mut self, entity: PrechatEntity) -> Self {
        self.prechat_entities.push(entity);
        self
    }

    /// Append a button or agent override.
    pub fn with_button_override(mut self, id: impl Into<String>) -> Self {
        self.button_overrides.push(id.into());
        self
    }
}

/// A visitor-submitted pre-chat form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrechatDetail {
    /// Form label, referenced by [`EntityFieldsMap::label`].
    pub label: String,
    /// Submitted value.
    pub value: String,
    /// Transcript fields the value is saved to.
    pub transcript_fields: Vec<String>,
    /// Show the value in the agent console.
    pub display_to_agent: bool,
    /// Run a knowledge search on the value.
    pub do_knowledge_search: bool,
}

impl PrechatDetail {
    /// A field shown to the agent and not saved to the transcript.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            display_to_agent: true,
            ..Default::default()
        }
    }

    /// Save the value to the given transcript fields.
    pub fn with_transcript_field(mut self, field: impl Into<String>) -> Self {
        self.transcript_fields.push(field.into());
        self
    }
}

/// A rule that finds or creates a CRM record from pre-chat details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrechatEntity {
    /// Record type, e.g. `Contact` or `Case`.
    pub entity_name: String,
    /// Open the record in the agent console when it is created.
    pub show_on_create: bool,
    /// Entity this record links to. Omitted from the wire when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_to_entity_name: Option<String>,
    /// Field of the linked entity. Omitted from the wire when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_to_entity_field: Option<String>,
    /// Transcript field that receives the record id.
    pub save_to_transcript: String,
    /// Field mappings from pre-chat labels.
    pub entity_fields_maps: Vec<EntityFieldsMap>,
}

impl PrechatEntity {
    /// A rule for `entity_name`, opened in the agent console when created.
    pub fn new(entity_name: impl Into<String>, save_to_transcript: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            show_on_create: true,
            save_to_transcript: save_to_transcript.into(),
            ..Default::default()
        }
    }

    /// Link the record to a field of another entity. Empty names leave the
    /// link unset.
    pub fn link_to(mut self, entity: impl Into<String>, field: impl Into<String>) -> Self {
        self.link_to_entity_name = Some(entity.into()).filter(|s| !s.is_empty());
        self.link_to_entity_field = Some(field.into()).filter(|s| !s.is_empty());
        self
    }

    /// Append a field mapping.
    pub fn with_field(mut self, map: EntityFieldsMap) -> Self {
        self.entity_fields_maps.push(map);
        self
    }
}

/// Maps a pre-chat detail label onto a record field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityFieldsMap {
    /// Record field name.
    pub field_name: String,
    /// Pre-chat detail label supplying the value.
    pub label: String,
    /// Search for an existing record on this field.
    pub do_find: bool,
    /// Require an exact match when searching.
    pub is_exact_match: bool,
    /// Fill this field on a newly created record.
    pub do_create: bool,
}

impl EntityFieldsMap {
    /// Look up an existing record by exact match on `field_name`.
    pub fn find(field_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            label: label.into(),
            do_find: true,
            is_exact_match: true,
            do_create: false,
        }
    }

    /// Fill `field_name` when a new record is created.
    pub fn create(field_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            label: label.into(),
            do_find: false,
            is_exact_match: false,
            do_create: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `Chasitor/ChatMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Message text.
    pub text: String,
}

impl SendMessageRequest {
    /// Body carrying `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Body of `Chasitor/ChatEnd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndChatRequest {
    /// Why the chat ended, e.g. [`END_REASON_CLIENT`].
    pub reason: String,
}

impl EndChatRequest {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_wire_names() {
        let session: Session = serde_json::from_value(json!({
            "key": "ec550263-354e-477c-b773-7747ff8ed9b7!1502914719519!4mXhPv7+X0kH5ivT5rhjLoA",
            "id": "ec550263-354e-477c-b773-7747ff8ed9b7",
            "clientPollTimeout": 40,
            "affinityToken": "878a1fa0"
        }))
        .unwrap();

        assert_eq!(session.id, "ec550263-354e-477c-b773-7747ff8ed9b7");
        assert_eq!(session.client_poll_timeout, 40);
        assert_eq!(session.affinity_token, "878a1fa0");
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_session_validate_reports_missing_field() {
        let mut session = Session {
            key: "k".into(),
            id: "i".into(),
            client_poll_timeout: 40,
            affinity_token: "t".into(),
        };
        session.affinity_token.clear();
        assert_eq!(session.validate(), Err("affinityToken"));

        session.id.clear();
        assert_eq!(session.validate(), Err("id"));

        assert_eq!(Session::default().validate(), Err("key"));
    }

    #[test]
    fn test_chasitor_init_wire_names() {
        let init = ChasitorInit::new("00D", "572", "573", "sess")
            .with_agent("005")
            .with_visitor_name("Ryan P")
            .with_detail(PrechatDetail::new(FIELD_CONTACT_ID, "003"))
            .with_entity(
                PrechatEntity::new("Contact", "Contact")
                    .link_to("Contact", "Id")
                    .with_field(EntityFieldsMap::find("Id", FIELD_CONTACT_ID)),
            )
            .with_button_override("005");

        let value = serde_json::to_value(&init).unwrap();

        assert_eq!(value["organizationId"], "00D");
        assert_eq!(value["deploymentId"], "572");
        assert_eq!(value["buttonId"], "573");
        assert_eq!(value["agentId"], "005");
        assert_eq!(value["doFallback"], true);
        assert_eq!(value["sessionId"], "sess");
        assert_eq!(value["visitorName"], "Ryan P");
        assert_eq!(value["receiveQueueUpdates"], true);
        assert_eq!(value["isPost"], true);
        assert_eq!(value["buttonOverrides"], json!(["005"]));
        assert_eq!(value["prechatDetails"][0]["transcriptFields"], json!([]));
        assert_eq!(value["prechatDetails"][0]["displayToAgent"], true);
        assert_eq!(value["prechatDetails"][0]["doKnowledgeSearch"], false);
        assert_eq!(value["prechatEntities"][0]["linkToEntityName"], "Contact");
        assert_eq!(value["prechatEntities"][0]["linkToEntityField"], "Id");
        assert_eq!(
            value["prechatEntities"][0]["entityFieldsMaps"][0],
            json!({
                "fieldName": "Id",
                "label": "ContactId",
                "doFind": true,
                "isExactMatch": true,
                "doCreate": false
            })
        );
    }

    #[test]
    fn test_unlinked_entity_omits_link_fields() {
        let entity = PrechatEntity::new("Case", FIELD_CASE_ID)
            .with_field(EntityFieldsMap::create("Subject", "Subject"));
        let value = serde_json::to_value(&entity).unwrap();

        let object = value.as_object().unwrap();
        assert!(!object.contains_key("linkToEntityName"));
        assert!(!object.contains_key("linkToEntityField"));
        assert_eq!(value["saveToTranscript"], "CaseId");
        assert_eq!(value["showOnCreate"], true);
    }

    #[test]
    fn test_empty_link_is_omitted() {
        let entity = PrechatEntity::new("Contact", "Contact").link_to("", "");
        assert_eq!(entity.link_to_entity_name, None);
        assert_eq!(entity.link_to_entity_field, None);

        let value = serde_json::to_value(&entity).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("linkToEntityName"));
        assert!(!object.contains_key("linkToEntityField"));

        let partial = PrechatEntity::new("Contact", "Contact").link_to("Contact", "");
        assert_eq!(partial.link_to_entity_name.as_deref(), Some("Contact"));
        assert_eq!(partial.link_to_entity_field, None);
    }

    #[test]
    fn test_chat_bodies() {
        assert_eq!(
            serde_json::to_value(SendMessageRequest::new("Hello world")).unwrap(),
            json!({"text": "Hello world"})
        );
        assert_eq!(
            serde_json::to_value(EndChatRequest::new(END_REASON_CLIENT)).unwrap(),
            json!({"reason": "client"})
        );
    }
}
