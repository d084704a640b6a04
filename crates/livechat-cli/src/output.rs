//! Terminal rendering of chat events.

use console::Style;
use livechat::Message;

/// Print one polled message, as a JSON line or a styled line.
pub fn print_message(message: &Message, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(message)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    let green = Style::new().green();
    let red = Style::new().red();
    let bold = Style::new().bold();

    match message {
        Message::ChatRequestSuccess(m) => println!(
            "{}",
            dim.apply_to(format!(
                "Queued at position {} (estimated wait {}s)",
                m.queue_position, m.estimated_wait_time
            ))
        ),
        Message::QueueUpdate(m) => println!(
            "{}",
            dim.apply_to(format!(
                "Queue position {} (estimated wait {}s)",
                m.position, m.estimated_wait_time
            ))
        ),
        Message::ChatEstablished(m) => {
            println!("{} {} joined the chat", green.apply_to("●"), m.name)
        }
        Message::ChatTransferred(m) => {
            println!("{} transferred to {}", green.apply_to("●"), m.name)
        }
        Message::ChatMessage(m) => println!("{} {}", bold.apply_to(format!("{}:", m.name)), m.text),
        Message::AgentTyping(m) => println!("{}", dim.apply_to(format!("{} is typing…", m.name))),
        Message::AgentNotTyping(_) => {}
        Message::AgentDisconnect(m) => {
            println!("{} {} disconnected", red.apply_to("●"), m.name)
        }
        Message::ChatRequestFail(m) => {
            println!("{} chat request failed: {}", red.apply_to("✗"), m.reason)
        }
        Message::ChatEnded(m) => println!("{} chat ended: {}", red.apply_to("●"), m.reason),
        Message::FileTransfer(m) => println!(
            "{}",
            dim.apply_to(format!("File transfer {}", m.transfer_type))
        ),
        other => println!("{}", dim.apply_to(format!("[{}]", other.message_type()))),
    }

    Ok(())
}

/// Print a message the visitor sent.
pub fn print_sent(text: &str, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::json!({"type": "Sent", "message": {"text": text}}));
    } else {
        println!("{} {}", Style::new().cyan().bold().apply_to("you:"), text);
    }
    Ok(())
}
