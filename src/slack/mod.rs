//! Slack-specific collaborators

pub mod directory;

pub use directory::SlackDirectory;
