//! Library root for `relay-bot`.
//!
//! Relay-bot re-posts messages forwarded into Slack by external bot
//! integrations, fixing up their mentions along the way:
//! - Plain-text `@name` tokens are resolved against the workspace roster
//! - Resolved mentions are rewritten as real `<@Uxxx>` references
//! - The message is re-posted under the original author's display name
//!
//! The bot integrates with Slack over Socket Mode for events and the Web API
//! for posting. The architecture is built around an extensible chat trait
//! that allows for different implementations of the platform boundary.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the relay-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with the chat client
/// - Starts the main event loop for processing messages
pub async fn start(config: Config) -> Void {
    info!("Starting relay-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider().install_default().unwrap();

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
