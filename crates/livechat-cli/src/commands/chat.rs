//! Chat command - run one scripted chat against a deployment.

use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use clap::Args;
use console::Style;
use livechat::{
    ChasitorInit, END_REASON_CLIENT, EntityFieldsMap, FIELD_CASE_ID, FIELD_CONTACT_ID, Header,
    LiveChatClient, Message, PrechatDetail, PrechatEntity, Session,
};
use serde::Serialize;

use super::Context;
use crate::output;

/// Pre-chat label carrying the contact id into the case.
const CONTACT_NAME_LABEL: &str = "Contact Name";

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Salesforce organization id
    #[arg(long, env = "LIVECHAT_ORGANIZATION_ID")]
    pub organization_id: String,

    /// Chat deployment id
    #[arg(long, env = "LIVECHAT_DEPLOYMENT_ID")]
    pub deployment_id: String,

    /// Chat button id
    #[arg(long, env = "LIVECHAT_BUTTON_ID")]
    pub button_id: String,

    /// Route to this agent first, falling back to the button queue
    #[arg(long, env = "LIVECHAT_AGENT_ID")]
    pub agent_id: Option<String>,

    /// Link the chat to this contact record
    #[arg(long, env = "LIVECHAT_CONTACT_ID")]
    pub contact_id: Option<String>,

    /// Name shown to the agent
    #[arg(long, default_value = "Visitor")]
    pub visitor_name: String,

    /// Visitor language
    #[arg(long, default_value = "en-US")]
    pub language: String,

    /// Subject of the case created for the chat
    #[arg(long)]
    pub subject: Option<String>,

    /// Message to send once an agent joins (repeatable)
    #[arg(short, long = "message", default_value = "Hello world")]
    pub messages: Vec<String>,

    /// End reason sent when closing the chat
    #[arg(long, default_value = END_REASON_CLIENT)]
    pub reason: String,

    /// Give up if no agent joins after this many polls
    #[arg(long, default_value_t = 10)]
    pub max_polls: u32,

    /// Pause between polls, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub poll_interval_ms: u64,
}

/// How the conversation part of the chat finished.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    /// An agent joined and every message was sent.
    Delivered,
    /// The server closed the chat before we did.
    Closed(String),
    /// The agent dropped before the messages were sent. The chat is still open.
    Disconnected(String),
    /// No agent joined within the poll budget.
    Unanswered,
}

/// Summary printed in JSON mode.
#[derive(Debug, Serialize)]
struct ChatSummary<'a> {
    session_id: &'a str,
    agent: Option<&'a str>,
    sent: usize,
    ended_by: &'static str,
}

/// Run the chat command.
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let dim = Style::new().dim();

    let session = client
        .create_session()
        .await
        .context("failed to create session")?;
    tracing::info!(session_id = %session.id, "Session created");

    let mut header = Header::for_session(&session);
    client
        .init_chasitor(&header, &chasitor_init(&args, &session))
        .await
        .context("chat request was rejected")?;

    if ctx.verbose && !ctx.json_output {
        println!(
            "{}",
            dim.apply_to(format!("Requested chat in session {}", session.id))
        );
    }

    let mut agent = None;
    let outcome = converse(&client, &mut header, &args, ctx, &mut agent).await;

    // Close the chat unless the server already did, even if the conversation failed.
    if !matches!(outcome, Ok(Outcome::Closed(_))) {
        header.advance();
        let ended = client.end_chat(&header, &args.reason).await;
        match (&outcome, ended) {
            (Ok(_), Err(e)) => return Err(e).context("failed to end chat"),
            (Err(_), Err(e)) => tracing::warn!(error = %e, "Failed to end chat after error"),
            (_, Ok(())) => tracing::info!(reason = %args.reason, "Chat ended"),
        }
    }

    match outcome? {
        Outcome::Delivered => {
            if ctx.json_output {
                let summary = ChatSummary {
                    session_id: &session.id,
                    agent: agent.as_deref(),
                    sent: args.messages.len(),
                    ended_by: "visitor",
                };
                println!("{}", serde_json::to_string(&summary)?);
            } else {
                println!("{}", dim.apply_to(format!("Chat ended ({})", args.reason)));
            }
            Ok(())
        }
        Outcome::Closed(reason) => bail!("chat closed by the server: {}", reason),
        Outcome::Disconnected(name) => bail!("agent {} disconnected", name),
        Outcome::Unanswered => bail!("no agent joined after {} polls", args.max_polls),
    }
}

/// Wait for an agent, then send every scripted message.
async fn converse(
    client: &LiveChatClient,
    header: &mut Header,
    args: &ChatArgs,
    ctx: &Context,
    agent: &mut Option<String>,
) -> Result<Outcome> {
    let interval = Duration::from_millis(args.poll_interval_ms);

    for poll in 1..=args.max_polls {
        let batch = client
            .list_messages(header)
            .await
            .context("failed to poll messages")?;
        tracing::debug!(poll, count = batch.messages.len(), "Polled messages");

        for message in &batch.messages {
            output::print_message(message, ctx.json_output)?;

            match message {
                Message::ChatEstablished(m) => *agent = Some(m.name.clone()),
                Message::ChatRequestFail(m) => return Ok(Outcome::Closed(m.reason.clone())),
                Message::ChatEnded(m) => return Ok(Outcome::Closed(m.reason.clone())),
                Message::AgentDisconnect(m) => return Ok(Outcome::Disconnected(m.name.clone())),
                _ => {}
            }
        }

        if agent.is_some() {
            break;
        }
        if poll < args.max_polls && !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }

    if agent.is_none() {
        return Ok(Outcome::Unanswered);
    }

    for text in &args.messages {
        header.advance();
        client
            .send_message(header, text.as_str())
            .await
            .context("failed to send message")?;
        output::print_sent(text, ctx.json_output)?;
    }

    Ok(Outcome::Delivered)
}

/// Build the chat request, linking contact and case records when asked to.
fn chasitor_init(args: &ChatArgs, session: &Session) -> ChasitorInit {
    let mut init = ChasitorInit::new(
        &args.organization_id,
        &args.deployment_id,
        &args.button_id,
        &session.id,
    )
    .with_visitor_name(&args.visitor_name)
    .with_client_info(
        format!("livechat-cli/{}", env!("CARGO_PKG_VERSION")),
        &args.language,
        "1920x1080",
    );

    if let Some(agent_id) = &args.agent_id {
        init = init.with_agent(agent_id).with_button_override(agent_id);
    }
    init = init.with_button_override(&args.button_id);

    let mut case = PrechatEntity::new("Case", FIELD_CASE_ID);

    if let Some(contact_id) = &args.contact_id {
        init = init
            .with_detail(PrechatDetail::new(FIELD_CONTACT_ID, contact_id))
            .with_detail(PrechatDetail::new(CONTACT_NAME_LABEL, contact_id))
            .with_entity(
                PrechatEntity::new("Contact", "Contact")
                    .link_to("Contact", "Id")
                    .with_field(EntityFieldsMap::find("Id", FIELD_CONTACT_ID)),
            );
        case = case.with_field(EntityFieldsMap::create("ContactId", CONTACT_NAME_LABEL));
    }

    if let Some(subject) = &args.subject {
        init = init.with_detail(PrechatDetail::new("Subject", subject));
        case = case.with_field(EntityFieldsMap::create("Subject", "Subject"));
    }

    if !case.entity_fields_maps.is_empty() {
        init = init.with_entity(case);
    }

    init
}
