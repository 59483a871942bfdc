//! Channel allow/deny policy.
//!
//! The policy is a single string:
//!
//! - empty or unset: no channel may receive messages
//! - `true` or `1`: every channel may receive messages
//! - `C123,D456`: only the listed channels
//! - `!C123,!D456`: every channel except the listed ones
//!
//! A list mixing both forms takes its mode from the first entry; entries of
//! the other form are dropped and logged.

use std::fmt;
use tracing::warn;

/// Environment variable holding the policy string.
pub const POLICY_ENV_VAR: &str = "SLACK_MCP_ADD_MESSAGE_TOOL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyMode {
    DenyAll,
    AllowAll,
    AllowList,
    DenyList,
}

impl PolicyMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyMode::DenyAll => "deny-all",
            PolicyMode::AllowAll => "allow-all",
            PolicyMode::AllowList => "allow-list",
            PolicyMode::DenyList => "deny-list",
        }
    }
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelPolicy {
    DenyAll,
    AllowAll,
    AllowList(Vec<String>),
    DenyList(Vec<String>),
}

impl ChannelPolicy {
    /// Parses a policy string. Never fails: anything unusable denies.
    ///
    /// # Examples
    ///
    /// ```
    /// use slackguard::policy::{ChannelPolicy, PolicyMode};
    ///
    /// assert_eq!(ChannelPolicy::parse("").mode(), PolicyMode::DenyAll);
    /// assert_eq!(ChannelPolicy::parse("TRUE").mode(), PolicyMode::AllowAll);
    /// assert_eq!(ChannelPolicy::parse("!C1").mode(), PolicyMode::DenyList);
    /// ```
    #[must_use]
    pub fn parse(config: &str) -> Self {
        let config = config.trim();
        if config.is_empty() {
            return ChannelPolicy::DenyAll;
        }
        if config.eq_ignore_ascii_case("true") || config == "1" {
            return ChannelPolicy::AllowAll;
        }

        let entries: Vec<&str> = config
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .collect();

        let Some(first) = entries.first() else {
            warn!(policy = config, "Channel policy has no entries, denying all channels");
            return ChannelPolicy::DenyAll;
        };
        let deny_mode = first.starts_with('!');

        let mut channels = Vec::with_capacity(entries.len());
        let mut ignored = Vec::new();
        for entry in &entries {
            match (deny_mode, entry.strip_prefix('!')) {
                (true, Some(channel)) if !channel.trim().is_empty() => {
                    channels.push(channel.trim().to_string());
                }
                (false, None) => channels.push((*entry).to_string()),
                _ => ignored.push(*entry),
            }
        }

        if !ignored.is_empty() {
            let mode = if deny_mode {
                PolicyMode::DenyList
            } else {
                PolicyMode::AllowList
            };
            warn!(
                policy = config,
                mode = mode.as_str(),
                ignored = ?ignored,
                "Channel policy mixes allow and deny entries; ignoring entries that do not match the first entry's mode"
            );
        }

        if channels.is_empty() {
            warn!(policy = config, "Channel policy has no usable entries, denying all channels");
            return ChannelPolicy::DenyAll;
        }

        if deny_mode {
            ChannelPolicy::DenyList(channels)
        } else {
            ChannelPolicy::AllowList(channels)
        }
    }

    #[must_use]
    pub fn mode(&self) -> PolicyMode {
        match self {
            ChannelPolicy::DenyAll => PolicyMode::DenyAll,
            ChannelPolicy::AllowAll => PolicyMode::AllowAll,
            ChannelPolicy::AllowList(_) => PolicyMode::AllowList,
            ChannelPolicy::DenyList(_) => PolicyMode::DenyList,
        }
    }

    #[must_use]
    pub fn allows(&self, channel_id: &str) -> bool {
        match self {
            ChannelPolicy::DenyAll => false,
            ChannelPolicy::AllowAll => true,
            ChannelPolicy::AllowList(list) => list.iter().any(|c| c == channel_id),
            ChannelPolicy::DenyList(list) => !list.iter().any(|c| c == channel_id),
        }
    }
}

/// Returns whether `channel_id` may receive messages under `policy_config`.
#[must_use]
pub fn is_channel_allowed(channel_id: &str, policy_config: &str) -> bool {
    ChannelPolicy::parse(policy_config).allows(channel_id)
}

/// Where the gate gets its policy string from on each check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    /// A policy string supplied by the caller.
    Fixed(String),
    /// Re-read from the named environment variable on every check, so edits
    /// take effect without a restart.
    Env(String),
}

impl PolicySource {
    #[must_use]
    pub fn fixed(config: impl Into<String>) -> Self {
        PolicySource::Fixed(config.into())
    }

    #[must_use]
    pub fn from_default_env() -> Self {
        PolicySource::Env(POLICY_ENV_VAR.to_string())
    }

    #[must_use]
    pub fn load(&self) -> ChannelPolicy {
        match self {
            PolicySource::Fixed(config) => ChannelPolicy::parse(config),
            PolicySource::Env(name) => {
                ChannelPolicy::parse(&std::env::var(name).unwrap_or_default())
            }
        }
    }
}

impl Default for PolicySource {
    fn default() -> Self {
        PolicySource::from_default_env()
    }
}
