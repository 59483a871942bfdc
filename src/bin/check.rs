//! Dry-run the outbound message guard.
//!
//! Reads a JSON request from stdin:
//!
//! ```json
//! {"channel": "#general", "text": "hello", "content_type": "text/markdown", "thread_ts": ""}
//! ```
//!
//! and prints either the `chat.postMessage` payload that would be sent or the
//! rejection. Names and mentions are resolved through Slack when
//! `SLACK_BOT_TOKEN` is set; otherwise only bare channel ids resolve.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use slackguard::content::ContentType;
use slackguard::core::config::GuardConfig;
use slackguard::directory::{ChannelDirectory, StaticDirectory};
use slackguard::gate::ChannelGate;
use slackguard::pipeline::{MessageGuard, OutgoingMessage};
use slackguard::slack::SlackDirectory;

#[derive(Debug, Deserialize)]
struct CheckRequest {
    channel: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    content_type: ContentType,
    thread_ts: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    slackguard::setup_logging();

    let config = GuardConfig::from_env()?;

    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("Failed to read request from stdin")?;
    let request: CheckRequest =
        serde_json::from_str(&body).context("Request is not a valid message JSON object")?;

    let directory: Arc<dyn ChannelDirectory> = match config.slack_bot_token.as_deref() {
        Some(token) => Arc::new(SlackDirectory::new(token)?),
        None => {
            info!("SLACK_BOT_TOKEN not set; only bare channel ids will resolve");
            Arc::new(StaticDirectory::new())
        }
    };

    let gate = ChannelGate::new(directory, config.policy_source.clone())
        .with_resolve_timeout(config.resolve_timeout);
    let guard = MessageGuard::new(gate);

    let mut message = OutgoingMessage::new(request.channel, request.text)
        .with_content_type(request.content_type);
    if let Some(ts) = request.thread_ts {
        message = message.with_thread_ts(ts);
    }

    match guard.prepare(&message).await {
        Ok(prepared) => {
            println!("{}", json!({ "ok": true, "payload": prepared.to_payload() }));
            Ok(())
        }
        Err(e) => {
            println!("{}", json!({ "ok": false, "error": e.kind(), "message": e.to_string() }));
            std::process::exit(1);
        }
    }
}
