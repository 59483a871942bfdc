use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::GuardError;

/// Upper bound on any thread timestamp we are willing to inspect.
pub const MAX_THREAD_TS_LENGTH: usize = 32;

// `\d` would also match non-ASCII digits.
static THREAD_TS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}\.[0-9]{6}$").expect("static regex compile"));

/// Validates an optional parent-message timestamp for a thread reply.
///
/// An empty string means "not a reply" and is accepted.
///
/// # Errors
///
/// Returns [`GuardError::InvalidTimestamp`] unless `ts` is empty or exactly
/// ten digits, a dot, and six digits.
///
/// # Examples
///
/// ```
/// use slackguard::timestamp::validate_thread_timestamp;
///
/// assert!(validate_thread_timestamp("").is_ok());
/// assert!(validate_thread_timestamp("1234567890.123456").is_ok());
/// assert!(validate_thread_timestamp("1234567890.12345").is_err());
/// ```
pub fn validate_thread_timestamp(ts: &str) -> Result<(), GuardError> {
    if ts.is_empty() {
        return Ok(());
    }

    if ts.len() > MAX_THREAD_TS_LENGTH {
        return Err(GuardError::InvalidTimestamp(format!(
            "thread timestamp exceeds {MAX_THREAD_TS_LENGTH} bytes"
        )));
    }

    if !THREAD_TS_RE.is_match(ts) {
        return Err(GuardError::InvalidTimestamp(format!(
            "'{}' is not in the form 1234567890.123456",
            ts.escape_debug()
        )));
    }

    Ok(())
}
