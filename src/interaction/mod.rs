//! Event handling for relay-bot.
//!
//! This module provides the core relay pipeline:
//! - Scanning attachment text for mention tokens and attribution
//! - Resolving tokens against the user directory
//! - Composing and posting the rewritten message

pub mod directory;
pub mod mention;
pub mod relay;
