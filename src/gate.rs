//! Secure resolution: validate, resolve, re-validate, then policy-check a
//! channel reference before anything is addressed to it.

use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

use crate::directory::ChannelDirectory;
use crate::errors::GuardError;
use crate::identifier::ChannelRef;
use crate::policy::{PolicyMode, PolicySource};

/// Default bound on a single directory lookup.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    Validate,
    Resolve,
    Revalidate,
    Policy,
}

impl ResolutionStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionStage::Validate => "validate",
            ResolutionStage::Resolve => "resolve",
            ResolutionStage::Revalidate => "revalidate",
            ResolutionStage::Policy => "policy",
        }
    }
}

impl fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A channel id that is well-formed and permitted by the policy in force
/// when it was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    pub reference: String,
    pub channel_id: String,
    pub policy_mode: PolicyMode,
}

pub struct ChannelGate<D> {
    directory: D,
    policy: PolicySource,
    resolve_timeout: Duration,
}

impl<D: ChannelDirectory> ChannelGate<D> {
    pub fn new(directory: D, policy: PolicySource) -> Self {
        Self {
            directory,
            policy,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    pub fn policy_source(&self) -> &PolicySource {
        &self.policy
    }

    /// Resolves `raw_reference` to a concrete channel id the policy permits.
    ///
    /// Bare ids are already concrete and skip the directory. The policy is
    /// loaded once per call, so a changed policy applies to the next call.
    /// Every rejection is logged with the failing stage, the raw reference
    /// and the policy mode.
    ///
    /// # Errors
    ///
    /// - [`GuardError::InvalidIdentifier`] if the raw reference is malformed
    /// - [`GuardError::ResolutionFailed`] if the lookup fails or times out
    /// - [`GuardError::InvalidResolvedIdentifier`] if the directory returns
    ///   anything other than a well-formed concrete id
    /// - [`GuardError::PolicyDenied`] if the policy forbids the channel
    pub async fn resolve_secure(&self, raw_reference: &str) -> Result<ResolvedChannel, GuardError> {
        let policy = self.policy.load();
        let mode = policy.mode();
        let reject = |stage: ResolutionStage, error: GuardError| {
            warn!(
                stage = stage.as_str(),
                reference = %raw_reference.escape_debug(),
                policy_mode = mode.as_str(),
                kind = error.kind(),
                error = %error,
                "Channel resolution rejected"
            );
            error
        };

        let parsed = ChannelRef::parse(raw_reference)
            .map_err(|e| reject(ResolutionStage::Validate, e))?;

        let channel_id = if parsed.is_concrete() {
            raw_reference.to_string()
        } else {
            self.lookup(raw_reference)
                .await
                .map_err(|e| reject(ResolutionStage::Resolve, e))?
        };

        match ChannelRef::parse(&channel_id) {
            Ok(resolved) if resolved.is_concrete() => {}
            Ok(_) => {
                return Err(reject(
                    ResolutionStage::Revalidate,
                    GuardError::InvalidResolvedIdentifier(format!(
                        "directory returned '{}', which is not a concrete channel id",
                        channel_id.escape_debug()
                    )),
                ));
            }
            Err(GuardError::InvalidIdentifier(reason)) => {
                return Err(reject(
                    ResolutionStage::Revalidate,
                    GuardError::InvalidResolvedIdentifier(reason),
                ));
            }
            Err(other) => return Err(reject(ResolutionStage::Revalidate, other)),
        }

        if !policy.allows(&channel_id) {
            return Err(reject(
                ResolutionStage::Policy,
                GuardError::PolicyDenied {
                    channel: channel_id,
                    mode: mode.to_string(),
                },
            ));
        }

        info!(
            reference = %raw_reference,
            channel_id = %channel_id,
            policy_mode = mode.as_str(),
            "Channel reference resolved"
        );

        Ok(ResolvedChannel {
            reference: raw_reference.to_string(),
            channel_id,
            policy_mode: mode,
        })
    }

    async fn lookup(&self, reference: &str) -> Result<String, GuardError> {
        match tokio::time::timeout(self.resolve_timeout, self.directory.resolve(reference)).await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(e @ GuardError::ResolutionFailed(_))) => Err(e),
            Ok(Err(other)) => Err(GuardError::ResolutionFailed(other.to_string())),
            Err(_) => Err(GuardError::ResolutionFailed(format!(
                "directory lookup timed out after {}ms",
                self.resolve_timeout.as_millis()
            ))),
        }
    }
}
