//! Lexical validation of channel, DM, group, name and mention references.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::GuardError;

/// Maximum length of any channel reference, in characters.
pub const MAX_CHANNEL_NAME_LENGTH: usize = 80;

static BARE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[CDG][A-Z0-9]{10}$").expect("static regex compile"));

// Names and mentions: no whitespace, control or invisible format characters
// (bidi overrides, zero-width spaces).
static REFERENCE_BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s\p{Cc}\p{Cf}]+$").expect("static regex compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Channel,
    DirectMessage,
    Group,
}

/// A channel reference that passed lexical validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRef<'a> {
    /// Concrete id such as `C1234567890`.
    Id { kind: ChannelKind, id: &'a str },
    /// `#general`, stored without the `#`.
    Name(&'a str),
    /// `@username`, stored without the `@`.
    Mention(&'a str),
}

impl<'a> ChannelRef<'a> {
    /// Classifies `raw` into one of the accepted shapes.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::InvalidIdentifier`] with the reason the reference
    /// was rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use slackguard::identifier::{ChannelKind, ChannelRef};
    ///
    /// assert_eq!(
    ///     ChannelRef::parse("G1234567890").unwrap(),
    ///     ChannelRef::Id { kind: ChannelKind::Group, id: "G1234567890" }
    /// );
    /// assert_eq!(ChannelRef::parse("#general").unwrap(), ChannelRef::Name("general"));
    /// ```
    pub fn parse(raw: &'a str) -> Result<Self, GuardError> {
        if raw.is_empty() {
            return Err(invalid("channel identifier is empty"));
        }

        let length = raw.chars().count();
        if length > MAX_CHANNEL_NAME_LENGTH {
            return Err(invalid(format!(
                "channel identifier is {length} characters, exceeding the limit of {MAX_CHANNEL_NAME_LENGTH}"
            )));
        }

        if let Some(name) = raw.strip_prefix('#') {
            return check_body(name, "channel name").map(|()| ChannelRef::Name(name));
        }
        if let Some(user) = raw.strip_prefix('@') {
            return check_body(user, "user mention").map(|()| ChannelRef::Mention(user));
        }

        let kind = match raw.as_bytes()[0] {
            b'C' => ChannelKind::Channel,
            b'D' => ChannelKind::DirectMessage,
            b'G' => ChannelKind::Group,
            _ => {
                return Err(invalid(format!(
                    "'{}' must start with C, D, G, # or @",
                    raw.escape_debug()
                )));
            }
        };

        if !BARE_ID_RE.is_match(raw) {
            return Err(invalid(format!(
                "'{}' must be its prefix followed by exactly 10 uppercase letters or digits",
                raw.escape_debug()
            )));
        }

        Ok(ChannelRef::Id { kind, id: raw })
    }

    #[must_use]
    pub fn is_concrete(&self) -> bool {
        matches!(self, ChannelRef::Id { .. })
    }
}

fn check_body(body: &str, what: &str) -> Result<(), GuardError> {
    if body.is_empty() {
        return Err(invalid(format!("{what} is empty")));
    }
    if !REFERENCE_BODY_RE.is_match(body) {
        return Err(invalid(format!(
            "{what} '{}' contains whitespace, control or format characters",
            body.escape_debug()
        )));
    }
    Ok(())
}

fn invalid(reason: impl Into<String>) -> GuardError {
    GuardError::InvalidIdentifier(reason.into())
}

/// Checks that `id` is a well-formed channel reference.
///
/// # Errors
///
/// Returns [`GuardError::InvalidIdentifier`] describing the problem.
pub fn validate_channel_identifier(id: &str) -> Result<(), GuardError> {
    ChannelRef::parse(id).map(|_| ())
}

/// Byte-level entry point for references that have not been decoded yet.
///
/// # Errors
///
/// Returns [`GuardError::InvalidIdentifier`] for invalid UTF-8 as well as for
/// every lexical failure of [`validate_channel_identifier`].
pub fn validate_channel_identifier_bytes(id: &[u8]) -> Result<(), GuardError> {
    let text = std::str::from_utf8(id).map_err(|e| {
        invalid(format!(
            "channel identifier contains invalid UTF-8 at offset {}",
            e.valid_up_to()
        ))
    })?;
    validate_channel_identifier(text)
}
