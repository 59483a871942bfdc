use std::env;
use std::time::Duration;

use crate::errors::GuardError;
use crate::gate::DEFAULT_RESOLVE_TIMEOUT;
use crate::policy::PolicySource;

const RESOLVE_TIMEOUT_ENV_VAR: &str = "SLACK_MCP_RESOLVE_TIMEOUT_MS";
const BOT_TOKEN_ENV_VAR: &str = "SLACK_BOT_TOKEN";

#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// The policy itself is not captured here; it is re-read on each check.
    pub policy_source: PolicySource,
    pub resolve_timeout: Duration,
    pub slack_bot_token: Option<String>,
}

impl GuardConfig {
    /// # Errors
    ///
    /// Returns [`GuardError::ConfigError`] if `SLACK_MCP_RESOLVE_TIMEOUT_MS`
    /// is set but is not a positive integer.
    pub fn from_env() -> Result<Self, GuardError> {
        Self::from_vars(RESOLVE_TIMEOUT_ENV_VAR, BOT_TOKEN_ENV_VAR)
    }

    fn from_vars(timeout_var: &str, token_var: &str) -> Result<Self, GuardError> {
        let resolve_timeout = match env::var(timeout_var) {
            Ok(raw) => parse_timeout_ms(&raw)
                .map_err(|e| GuardError::ConfigError(format!("{timeout_var}: {e}")))?,
            Err(_) => DEFAULT_RESOLVE_TIMEOUT,
        };

        Ok(Self {
            policy_source: PolicySource::from_default_env(),
            resolve_timeout,
            slack_bot_token: env::var(token_var).ok().filter(|t| !t.is_empty()),
        })
    }
}

fn parse_timeout_ms(raw: &str) -> Result<Duration, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(format!("'{raw}' is not a number of milliseconds: {e}")),
    }
}
