//! Slackguard - input validation and channel policy for outbound Slack messages.
//!
//! Every message headed for Slack passes through the same sequence before it is
//! dispatched:
//! 1. The channel reference is lexically validated, resolved through a
//!    [`directory::ChannelDirectory`], re-validated and checked against the
//!    channel policy ([`gate::ChannelGate::resolve_secure`])
//! 2. The body is checked for valid UTF-8 and length, and markdown bodies are
//!    escaped ([`content::sanitize_message_content`])
//! 3. Any thread timestamp is checked for the `1234567890.123456` form
//!    ([`timestamp::validate_thread_timestamp`])
//!
//! The validators are pure functions; only directory lookups are async.
//!
//! # Example
//!
//! ```
//! use slackguard::directory::StaticDirectory;
//! use slackguard::gate::ChannelGate;
//! use slackguard::pipeline::{MessageGuard, OutgoingMessage};
//! use slackguard::policy::PolicySource;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), slackguard::GuardError> {
//! let directory = StaticDirectory::new().with_entry("#general", "C1234567890");
//! let guard = MessageGuard::new(ChannelGate::new(directory, PolicySource::fixed("C1234567890")));
//!
//! let prepared = guard
//!     .prepare(&OutgoingMessage::new("#general", "Deploy finished"))
//!     .await?;
//! assert_eq!(prepared.channel_id(), "C1234567890");
//! # Ok(())
//! # }
//! ```
// Module declarations
pub mod content;
pub mod core;
pub mod directory;
pub mod errors;
pub mod gate;
pub mod identifier;
pub mod pipeline;
pub mod policy;
pub mod slack;
pub mod timestamp;

pub use errors::GuardError;

/// Configure structured logging with JSON output.
///
/// Honours `RUST_LOG`, defaulting to `info`. Safe to call more than once; only
/// the first call installs a subscriber.
///
/// # Example
///
/// ```
/// slackguard::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
