//! Slack implementation of the chat service, backed by Socket Mode.

use std::sync::Arc;

use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::prelude::*;
use tokio::sync::{
    Mutex,
    mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
};
use tracing::{info, instrument, warn};

use crate::base::{
    config::Config,
    types::{InboundEvent, Res, User, Void},
};

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub fn slack(config: &Config) -> Res<Self> {
        let client = SlackChatClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}

// Structs.

/// User state for the slack socket client.
struct SlackUserState {
    events: UnboundedSender<InboundEvent>,
}

/// Slack client implementation.
///
/// The Socket Mode listener runs on a background task and feeds inbound
/// events into a channel that `read_events` drains, so the consumer side
/// stays a plain sequential poll.
struct SlackChatClient {
    app_token: SlackApiToken,
    bot_token: SlackApiToken,
    client: Arc<FullClient>,
    events_tx: UnboundedSender<InboundEvent>,
    events_rx: Mutex<UnboundedReceiver<InboundEvent>>,
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    pub fn new(config: &Config) -> Res<Self> {
        // Initialize tokens.

        let app_token = SlackApiToken::new(SlackApiTokenValue(config.slack_app_token.clone()));
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack_bot_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        let (events_tx, events_rx) = unbounded_channel();

        Ok(Self {
            app_token,
            bot_token,
            client,
            events_tx,
            events_rx: Mutex::new(events_rx),
        })
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    #[instrument(name = "SlackChatClient::connect", skip_all)]
    async fn connect(&self) -> Res<Vec<User>> {
        let session = self.client.open_session(&self.bot_token);

        // Verify the credentials before anything else.

        let bot_user = session.auth_test().await?;
        info!("Connected to Slack as user ID: {}", bot_user.user_id.0);

        // Load the full workspace roster, in the order Slack returns it.

        let members = session.users_list(&SlackApiUsersListRequest::new()).await?.members;
        let roster = members
            .into_iter()
            .filter_map(|member| {
                member.name.map(|name| User {
                    name,
                    id: member.id.0,
                })
            })
            .collect();

        // Initialize the socket mode listener.

        let socket_mode_callbacks = SlackSocketModeListenerCallbacks::new()
            .with_command_events(handle_command_event)
            .with_interaction_events(handle_interaction_event)
            .with_push_events(handle_push_event);

        let listener_environment = Arc::new(SlackClientEventsListenerEnvironment::new(self.client.clone()).with_user_state(SlackUserState {
            events: self.events_tx.clone(),
        }));

        let socket_mode_listener = Arc::new(SlackClientSocketModeListener::new(
            &SlackClientSocketModeConfig::new(),
            listener_environment,
            socket_mode_callbacks,
        ));

        // Register the app token to listen for events, then serve the WS
        // connections on a background task so the event loop can poll.
        socket_mode_listener.listen_for(&self.app_token).await?;

        tokio::spawn(async move {
            socket_mode_listener.serve().await;
        });

        Ok(roster)
    }

    async fn read_events(&self) -> Res<Vec<InboundEvent>> {
        let mut events_rx = self.events_rx.lock().await;

        // Block for the first event, then drain whatever else has queued up.

        let first = events_rx.recv().await.ok_or_else(|| anyhow::anyhow!("Slack event stream closed"))?;
        let mut events = vec![first];
        while let Ok(event) = events_rx.try_recv() {
            events.push(event);
        }

        Ok(events)
    }

    #[instrument(skip(self, text))]
    async fn post_message(&self, channel: &str, text: &str, username: &str) -> Void {
        let content = SlackMessageContent::new().with_text(text.to_string());

        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel.to_string()), content)
            .with_username(username.to_string())
            .with_link_names(true);

        let session = self.client.open_session(&self.bot_token);

        let _ = session.chat_post_message(&request).await.map_err(|e| anyhow::anyhow!("Failed to post message: {}", e))?;

        Ok(())
    }
}

// Socket mode listener callbacks for Slack.

/// Handles command events from Slack.
async fn handle_command_event(
    event: SlackCommandEvent,
    _client: Arc<SlackHyperClient>,
    _states: SlackClientEventsUserState,
) -> Result<SlackCommandEventResponse, Box<dyn std::error::Error + Send + Sync>> {
    warn!("[COMMAND] {:#?}", event);
    Ok(SlackCommandEventResponse::new(SlackMessageContent::new().with_text("No app commands are currently supported.".into())))
}

/// Handles interaction events from Slack.
async fn handle_interaction_event(event: SlackInteractionEvent, _client: Arc<SlackHyperClient>, _states: SlackClientEventsUserState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    warn!("[INTERACTION] {:#?}", event);
    Ok(())
}

/// Handles push events from Slack by bridging them into the event channel.
#[instrument(skip_all)]
async fn handle_push_event(event_callback: SlackPushEventCallback, _client: Arc<SlackHyperClient>, states: SlackClientEventsUserState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let states = states.read().await;
    let user_state = states.get_user_state::<SlackUserState>().ok_or(anyhow::anyhow!("Failed to get user state"))?;

    // Message events round-trip through their wire JSON into the relay's own
    // model; everything else is forwarded untyped so downstream hooks still
    // see it.
    let event = match event_callback.event {
        SlackEventCallbackBody::Message(message_event) => {
            let message = serde_json::from_value(serde_json::to_value(&message_event)?)?;
            InboundEvent::Message(message)
        }
        _ => InboundEvent::Other,
    };

    user_state.events.send(event).map_err(|_| anyhow::anyhow!("Event channel closed"))?;

    Ok(())
}
