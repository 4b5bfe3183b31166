//! Runtime services and shared state for the relay-bot.

use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{InboundEvent, Res, Void},
    },
    interaction::{directory::UserDirectory, relay::RelayEngine},
    service::chat::ChatClient,
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the chat client and configuration. It is designed to be
/// trivially cloneable, allowing it to be passed around without the need for
/// `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the slack client.
        let chat = ChatClient::slack(&config)?;

        Ok(Self { config, chat })
    }

    /// Connect, build the user directory from the roster, and drive the
    /// read/dispatch cycle until the transport fails.
    pub async fn start(&self) -> Void {
        let roster = self.chat.connect().await?;
        let directory = UserDirectory::from_roster(roster);

        info!("Loaded {} users into the directory", directory.len());

        let engine = RelayEngine::new(&self.config, directory, self.chat.clone());

        loop {
            for event in self.chat.read_events().await? {
                engine.dispatch(&event).await;
                self.catch_all(&event);
            }
        }
    }

    /// Extension point for handlers that want every event, relayed or not.
    fn catch_all(&self, _event: &InboundEvent) {}
}
