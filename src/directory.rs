//! Name and mention lookup used by secure resolution.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::GuardError;

/// Maps a `#name` or `@user` reference to a concrete channel id.
///
/// Implementations only perform the lookup. Their output is validated and
/// policy-checked by the gate, so a directory may return anything.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// # Errors
    ///
    /// Returns [`GuardError::ResolutionFailed`] when the reference is unknown
    /// or the lookup itself fails.
    async fn resolve(&self, reference: &str) -> Result<String, GuardError>;
}

#[async_trait]
impl<T: ChannelDirectory + ?Sized> ChannelDirectory for Arc<T> {
    async fn resolve(&self, reference: &str) -> Result<String, GuardError> {
        (**self).resolve(reference).await
    }
}

/// Fixed reference table, keyed by the raw reference (`#general`, `@alice`).
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    entries: HashMap<String, String>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, reference: impl Into<String>, channel_id: impl Into<String>) -> Self {
        self.insert(reference, channel_id);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, channel_id: impl Into<String>) {
        self.entries.insert(reference.into(), channel_id.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticDirectory {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl ChannelDirectory for StaticDirectory {
    async fn resolve(&self, reference: &str) -> Result<String, GuardError> {
        self.entries
            .get(reference)
            .cloned()
            .ok_or_else(|| GuardError::ResolutionFailed(format!("'{reference}' not found")))
    }
}
