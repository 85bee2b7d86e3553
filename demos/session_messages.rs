//! Example: print the message history of a session.
//!
//! Run with: cargo run --example session_messages -- <session-id>
//!
//! Connects to `OPENCODE_BASE_URL` (default http://127.0.0.1:4096).

use opencode_sdk::session::{AssistantMessagePart, Message};
use opencode_sdk::{init_logger, Client};

#[tokio::main]
async fn main() -> Result<(), opencode_sdk::Error> {
    let _guard = init_logger(None);
    let session_id = std::env::args().nth(1).unwrap_or_default();

    let client = Client::from_env()?;
    for message in client.session_messages(&session_id, None).await? {
        match message.variant() {
            Message::User(_) => println!("user> {}", message.variant().text_content().trim()),
            Message::Assistant(m) => {
                for part in &m.parts {
                    match part {
                        AssistantMessagePart::Text(t) => println!("assistant> {}", t.text),
                        AssistantMessagePart::Tool(t) => {
                            println!("  [tool {}] {}", t.tool, t.state.output().unwrap_or("..."))
                        }
                        AssistantMessagePart::StepStart(_) => {}
                        AssistantMessagePart::Unknown(p) => {
                            println!("  [{}]", p.tag().unwrap_or("?"))
                        }
                    }
                }
                if let Some(err) = &m.error {
                    println!("  error: {}", err.message().unwrap_or("unknown"));
                }
            }
            Message::Unknown(_) => println!("?> {}", message.raw()),
        }
    }
    Ok(())
}
