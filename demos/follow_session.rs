//! Example: send a prompt and stream the reply as it is generated.
//!
//! Run with: cargo run --example follow_session -- <session-id> <provider> <model> <prompt>

use opencode_sdk::session::{PartInput, SendMessageRequest};
use opencode_sdk::{init_logger, Client};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), opencode_sdk::Error> {
    let _guard = init_logger(None);
    let mut args = std::env::args().skip(1);
    let session_id = args.next().unwrap_or_default();
    let provider = args.next().unwrap_or_else(|| "anthropic".to_string());
    let model = args.next().unwrap_or_else(|| "claude-sonnet-4".to_string());
    let prompt = args.next().unwrap_or_else(|| "Hello".to_string());

    let client = Client::from_env()?;
    let request = SendMessageRequest::new(provider, model, vec![PartInput::text(prompt)]);
    client
        .session_prompt_async(&session_id, None, &request)
        .await?;
    client
        .stream_session_text(None, &session_id, |text| {
            print!("{}", text);
            let _ = std::io::stdout().flush();
        })
        .await?;
    println!();
    Ok(())
}
