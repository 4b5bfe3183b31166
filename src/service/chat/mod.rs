//! Chat service integration for relay-bot.
//!
//! This module provides functionality for interacting with chat platforms like Slack:
//! - Connecting and loading the workspace roster
//! - Reading realtime events
//! - Posting messages under an arbitrary display name
//!
//! It defines the `GenericChatClient` trait that can be implemented for different
//! chat services, with a default implementation for Slack.

pub mod slack;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{InboundEvent, Res, User, Void};

// Traits.

/// Generic "chat" trait that clients must implement.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Connect to the platform, start the realtime listener, and return the
    /// full user roster in the order the platform delivers it.
    async fn connect(&self) -> Res<Vec<User>>;

    /// Read the next batch of realtime events.
    ///
    /// Blocks until at least one event is available; an error means the
    /// transport is gone and the caller should give up.
    async fn read_events(&self) -> Res<Vec<InboundEvent>>;

    /// Post a message to a channel under the given display name.
    async fn post_message(&self, channel: &str, text: &str, username: &str) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
