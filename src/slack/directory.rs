//! Slack-backed channel directory.
//!
//! `#name` is looked up through `conversations.list`; `@user` through
//! `users.list` followed by `conversations.open` to get the DM channel.

use async_trait::async_trait;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::*;
use slack_morphism::{SlackApiToken, SlackApiTokenValue};
use tracing::debug;

use crate::directory::ChannelDirectory;
use crate::errors::GuardError;

/// Page size for list calls.
const PAGE_LIMIT: u16 = 200;

/// Stop paging after this many pages so a huge workspace cannot stall a send.
const MAX_PAGES: usize = 25;

pub struct SlackDirectory {
    client: SlackHyperClient,
    token: SlackApiToken,
}

impl SlackDirectory {
    /// # Errors
    ///
    /// Returns [`GuardError::ConfigError`] if the HTTP connector cannot be built.
    pub fn new(bot_token: &str) -> Result<Self, GuardError> {
        let connector = SlackClientHyperConnector::new().map_err(|e| {
            GuardError::ConfigError(format!("Failed to create Slack HTTP connector: {e}"))
        })?;
        Ok(Self {
            client: SlackHyperClient::new(connector),
            token: SlackApiToken::new(SlackApiTokenValue::new(bot_token.to_string())),
        })
    }

    async fn find_channel_by_name(&self, name: &str) -> Result<String, GuardError> {
        let session = self.client.open_session(&self.token);
        let mut cursor: Option<SlackCursorId> = None;

        for page in 0..MAX_PAGES {
            let request = SlackApiConversationsListRequest::new()
                .with_limit(PAGE_LIMIT)
                .with_exclude_archived(true)
                .with_types(vec![
                    SlackConversationType::Public,
                    SlackConversationType::Private,
                ])
                .opt_cursor(cursor.take());
            let response = session.conversations_list(&request).await?;
            debug!(page, count = response.channels.len(), "Fetched conversations page");

            if let Some(channel) = response
                .channels
                .iter()
                .find(|c| c.name.as_deref() == Some(name))
            {
                return Ok(channel.id.0.clone());
            }

            cursor = next_cursor(response.response_metadata.as_ref());
            if cursor.is_none() {
                break;
            }
        }

        Err(GuardError::ResolutionFailed(format!("channel '#{name}' not found")))
    }

    async fn find_user_by_name(&self, user: &str) -> Result<SlackUserId, GuardError> {
        let session = self.client.open_session(&self.token);
        let mut cursor: Option<SlackCursorId> = None;

        for page in 0..MAX_PAGES {
            let request = SlackApiUsersListRequest::new()
                .with_limit(PAGE_LIMIT)
                .opt_cursor(cursor.take());
            let response = session.users_list(&request).await?;
            debug!(page, count = response.members.len(), "Fetched users page");

            if let Some(member) = response
                .members
                .iter()
                .find(|m| m.name.as_deref() == Some(user))
            {
                return Ok(member.id.clone());
            }

            cursor = next_cursor(response.response_metadata.as_ref());
            if cursor.is_none() {
                break;
            }
        }

        Err(GuardError::ResolutionFailed(format!("user '@{user}' not found")))
    }

    async fn open_dm(&self, user_id: SlackUserId) -> Result<String, GuardError> {
        let session = self.client.open_session(&self.token);
        // Returns the existing IM channel if one is already open.
        let request = SlackApiConversationsOpenRequest::new().with_users(vec![user_id]);
        let response = session.conversations_open(&request).await?;
        Ok(response.channel.id.0)
    }
}

fn next_cursor(metadata: Option<&SlackResponseMetadata>) -> Option<SlackCursorId> {
    metadata
        .and_then(|m| m.next_cursor.clone())
        .filter(|c| !c.0.is_empty())
}

#[async_trait]
impl ChannelDirectory for SlackDirectory {
    async fn resolve(&self, reference: &str) -> Result<String, GuardError> {
        if let Some(name) = reference.strip_prefix('#') {
            return self.find_channel_by_name(name).await;
        }
        if let Some(user) = reference.strip_prefix('@') {
            let user_id = self.find_user_by_name(user).await?;
            return self.open_dm(user_id).await;
        }
        Err(GuardError::ResolutionFailed(format!(
            "'{reference}' is neither a channel name nor a user mention"
        )))
    }
}
