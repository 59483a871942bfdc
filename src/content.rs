//! Message body validation and markup escaping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::GuardError;

/// Slack's own limit on a single message body, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 40_000;

/// How the message body will be rendered downstream.
///
/// Deserializes through [`FromStr`], so JSON input accepts the same spellings
/// as `str::parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ContentType {
    #[default]
    #[serde(rename = "text/plain")]
    Plain,
    #[serde(rename = "text/markdown")]
    Markdown,
}

impl ContentType {
    #[must_use]
    pub fn as_mime(self) -> &'static str {
        match self {
            ContentType::Plain => "text/plain",
            ContentType::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

impl FromStr for ContentType {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text/plain" | "plain" => Ok(ContentType::Plain),
            "text/markdown" | "markdown" => Ok(ContentType::Markdown),
            other => Err(GuardError::InvalidContentType(other.to_string())),
        }
    }
}

impl TryFrom<String> for ContentType {
    type Error = GuardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validates and, for markdown, escapes a raw message body.
///
/// The body must be valid UTF-8 and at most [`MAX_MESSAGE_LENGTH`] characters.
/// Markdown content has `< > & ' "` replaced by their entity forms; plain
/// content is returned untouched since it is never rendered as markup.
///
/// Escaping is not idempotent: feeding the output back in escapes the `&` of
/// every entity a second time.
///
/// # Errors
///
/// Returns [`GuardError::EncodingError`] for invalid UTF-8 and
/// [`GuardError::LengthExceeded`] for over-long bodies.
///
/// # Examples
///
/// ```
/// use slackguard::content::{sanitize_message_content, ContentType};
///
/// let safe = sanitize_message_content(b"<b>hi</b>", ContentType::Markdown).unwrap();
/// assert_eq!(safe, "&lt;b&gt;hi&lt;/b&gt;");
/// ```
pub fn sanitize_message_content(
    content: &[u8],
    content_type: ContentType,
) -> Result<String, GuardError> {
    let text = std::str::from_utf8(content).map_err(|e| GuardError::EncodingError {
        offset: e.valid_up_to(),
    })?;
    sanitize_text(text, content_type)
}

/// Same as [`sanitize_message_content`] for input already known to be UTF-8.
///
/// # Errors
///
/// Returns [`GuardError::LengthExceeded`] for over-long bodies.
pub fn sanitize_text(text: &str, content_type: ContentType) -> Result<String, GuardError> {
    // Byte length bounds the char count, so short inputs skip the count.
    if text.len() > MAX_MESSAGE_LENGTH {
        let length = text.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(GuardError::LengthExceeded {
                length,
                max: MAX_MESSAGE_LENGTH,
            });
        }
    }

    match content_type {
        ContentType::Plain => Ok(text.to_string()),
        ContentType::Markdown => Ok(escape_markup(text)),
    }
}

/// Replaces the five markup-significant characters with entities.
#[must_use]
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multibyte_text_is_measured_in_characters() {
        // 3 bytes per char, so the byte length is well over the limit.
        let text = "€".repeat(MAX_MESSAGE_LENGTH);
        assert!(text.len() > MAX_MESSAGE_LENGTH);
        assert_eq!(sanitize_text(&text, ContentType::Plain).unwrap(), text);
    }

    #[test]
    fn encoding_error_reports_first_bad_offset() {
        let err = sanitize_message_content(b"ok\xff\xfe", ContentType::Plain).unwrap_err();
        assert_eq!(err, GuardError::EncodingError { offset: 2 });
    }

    #[test]
    fn content_type_parses_mime_and_bare_names() {
        assert_eq!("text/markdown".parse::<ContentType>().unwrap(), ContentType::Markdown);
        assert_eq!("Plain".parse::<ContentType>().unwrap(), ContentType::Plain);
        assert!("text/html".parse::<ContentType>().is_err());
    }

    #[test]
    fn content_type_json_matches_from_str() {
        for (raw, expected) in [
            ("\"Text/Markdown\"", ContentType::Markdown),
            ("\"markdown\"", ContentType::Markdown),
            ("\"TEXT/PLAIN\"", ContentType::Plain),
            ("\" plain \"", ContentType::Plain),
        ] {
            assert_eq!(serde_json::from_str::<ContentType>(raw).unwrap(), expected, "{raw}");
        }
        assert!(serde_json::from_str::<ContentType>("\"text/html\"").is_err());

        let rendered = serde_json::to_string(&ContentType::Markdown).unwrap();
        assert_eq!(rendered, "\"text/markdown\"");
    }
}
