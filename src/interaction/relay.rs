//! Relays forwarded bot messages, rewriting plain-text mentions into
//! resolvable references.

use tracing::{debug, error, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{Attachment, InboundEvent, MessageEvent, OutboundMessage, Void},
    },
    interaction::{directory::UserDirectory, mention},
    service::chat::ChatClient,
};

const BOT_MESSAGE_SUBTYPE: &str = "bot_message";

/// Orchestrates the relay pipeline for one inbound event at a time:
/// filter, expand attachments, compose, post.
pub struct RelayEngine {
    allowed_bots: Vec<String>,
    fallback_username: String,
    directory: UserDirectory,
    chat: ChatClient,
}

impl RelayEngine {
    pub fn new(config: &Config, directory: UserDirectory, chat: ChatClient) -> Self {
        Self {
            allowed_bots: config.external_bots(),
            fallback_username: config.relay_username.clone(),
            directory,
            chat,
        }
    }

    /// Dispatches one inbound event. Event-level failures are logged and
    /// swallowed here; only a transport read failure can take the loop down.
    #[instrument(skip_all)]
    pub async fn dispatch(&self, event: &InboundEvent) {
        let result = match event {
            InboundEvent::Message(message) => self.relay_message(message).await,
            InboundEvent::Other => Ok(()),
        };

        if let Err(err) = result {
            error!("Error while relaying: {}", err);
        }
    }

    async fn relay_message(&self, message: &MessageEvent) -> Void {
        // Only forwarded messages from allowlisted external bots qualify.
        if message.subtype.as_deref() != Some(BOT_MESSAGE_SUBTYPE) {
            return Ok(());
        }
        let Some(bot_id) = message.bot_id.as_deref() else {
            return Ok(());
        };
        if !self.allowed_bots.iter().any(|allowed| allowed == bot_id) {
            debug!("Ignoring message from bot {} outside the allowlist", bot_id);
            return Ok(());
        }

        let channel = message.channel.as_deref().ok_or_else(|| anyhow::anyhow!("bot_message event carries no channel"))?;
        let attachments = message.attachments.as_ref().ok_or_else(|| anyhow::anyhow!("bot_message event carries no attachments"))?;

        // One post per attachment with text; a failed post never blocks the
        // attachments after it.
        for attachment in attachments {
            let Some(outbound) = self.compose(channel, attachment) else {
                continue;
            };

            if let Err(err) = self.chat.post_message(&outbound.channel, &outbound.text, &outbound.username).await {
                warn!("Failed to post relayed message to {}: {}", outbound.channel, err);
            }
        }

        Ok(())
    }

    /// Builds the outbound post for one attachment, or `None` when the
    /// attachment has no text to scan.
    ///
    /// An attachment whose mentions all fail to resolve still yields a post
    /// with empty text.
    fn compose(&self, channel: &str, attachment: &Attachment) -> Option<OutboundMessage> {
        let text = attachment.text.as_deref().filter(|text| !text.is_empty())?;

        let rewritten = mention::extract_mentions(text)
            .into_iter()
            .filter_map(|token| self.directory.resolve(token))
            .map(|id| format!("<@{id}> ^"))
            .collect::<Vec<_>>()
            .join(" ");

        let username = mention::extract_author(attachment.pretext.as_deref()).unwrap_or_else(|| self.fallback_username.clone());

        Some(OutboundMessage {
            channel: channel.to_string(),
            text: rewritten,
            username,
        })
    }
}
