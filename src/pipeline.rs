//! The full send-path check: secure resolution, content sanitization and
//! thread timestamp validation, in that order.

use serde_json::{Value, json};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::content::{ContentType, sanitize_message_content};
use crate::directory::ChannelDirectory;
use crate::errors::GuardError;
use crate::gate::ChannelGate;
use crate::timestamp::validate_thread_timestamp;

/// A message as received from the caller, before any checks.
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub channel: String,
    pub content: Vec<u8>,
    pub content_type: ContentType,
    pub thread_ts: Option<String>,
}

impl OutgoingMessage {
    pub fn new(channel: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            channel: channel.into(),
            content: content.into(),
            content_type: ContentType::Plain,
            thread_ts: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    #[must_use]
    pub fn with_thread_ts(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }
}

/// A message that passed every check. Only [`MessageGuard::prepare`] builds
/// one, so its text has been sanitized exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedMessage {
    correlation_id: String,
    channel_id: String,
    text: String,
    content_type: ContentType,
    thread_ts: Option<String>,
}

impl PreparedMessage {
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn thread_ts(&self) -> Option<&str> {
        self.thread_ts.as_deref()
    }

    /// Builds the JSON body for `chat.postMessage`.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "channel": self.channel_id,
            "text": self.text,
            "mrkdwn": self.content_type == ContentType::Markdown,
        });

        if let Some(ts) = &self.thread_ts {
            payload["thread_ts"] = Value::String(ts.clone());
        }

        payload
    }
}

pub struct MessageGuard<D> {
    gate: ChannelGate<D>,
}

impl<D: ChannelDirectory> MessageGuard<D> {
    pub fn new(gate: ChannelGate<D>) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &ChannelGate<D> {
        &self.gate
    }

    /// Runs every check on `message`; any error means the message must not
    /// be sent.
    ///
    /// # Errors
    ///
    /// Returns the first [`GuardError`] raised by secure resolution, content
    /// sanitization or thread timestamp validation.
    pub async fn prepare(&self, message: &OutgoingMessage) -> Result<PreparedMessage, GuardError> {
        let correlation_id = Uuid::new_v4().to_string();
        let span = info_span!("prepare_message", correlation_id = %correlation_id);

        async {
            let resolved = self.gate.resolve_secure(&message.channel).await?;
            let text = sanitize_message_content(&message.content, message.content_type)?;

            let thread_ts = message.thread_ts.as_deref().unwrap_or_default();
            validate_thread_timestamp(thread_ts)?;

            #[cfg(feature = "debug-logs")]
            tracing::debug!(text = %text, "Sanitized message text");
            #[cfg(not(feature = "debug-logs"))]
            tracing::debug!(
                "Sanitized message text: [... content masked, enable debug-logs feature to view ...]"
            );

            info!(
                channel_id = %resolved.channel_id,
                content_type = %message.content_type,
                chars = text.chars().count(),
                threaded = !thread_ts.is_empty(),
                "Message accepted for dispatch"
            );

            Ok::<_, GuardError>(PreparedMessage {
                correlation_id: correlation_id.clone(),
                channel_id: resolved.channel_id,
                text,
                content_type: message.content_type,
                thread_ts: (!thread_ts.is_empty()).then(|| thread_ts.to_string()),
            })
        }
        .instrument(span.clone())
        .await
        .inspect_err(|e| {
            let _enter = span.enter();
            warn!(kind = e.kind(), error = %e, "Message rejected");
        })
    }
}
