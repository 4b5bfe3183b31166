//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default channel for posts that are not tied to an inbound event.
fn default_relay_channel() -> String {
    "#general".to_string()
}

/// Default posting identity when no author can be extracted.
fn default_relay_username() -> String {
    "relay-bot".to_string()
}

/// Configuration for the relay-bot application.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Slack app token (`SLACK_APP_TOKEN`).
    pub slack_app_token: String,
    /// Slack bot token (`SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// Comma-separated IDs of the external bots whose forwarded messages are
    /// relayed (`EXTERNAL_BOT_IDS`).
    pub external_bot_ids: String,
    /// Channel for posts that are not tied to an inbound event
    /// (`RELAY_CHANNEL`). Startup wiring only; the relay itself always posts
    /// back to the originating channel.
    #[serde(default = "default_relay_channel")]
    pub relay_channel: String,
    /// Username to post under when the forwarded message carries no
    /// attributable author (`RELAY_USERNAME`).
    #[serde(default = "default_relay_username")]
    pub relay_username: String,
}

impl ConfigInner {
    /// The parsed external-bot allowlist.
    pub fn external_bots(&self) -> Vec<String> {
        self.external_bot_ids.split(',').map(str::trim).filter(|id| !id.is_empty()).map(str::to_string).collect()
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("RELAY_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.external_bots().is_empty() {
            return Err(anyhow::anyhow!("At least one external bot ID must be configured."));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_bots_splits_and_trims() {
        let config = ConfigInner {
            external_bot_ids: "B1, B2 ,,B3".to_string(),
            ..Default::default()
        };

        assert_eq!(config.external_bots(), vec!["B1", "B2", "B3"]);
    }

    #[test]
    fn external_bots_is_empty_for_blank_input() {
        let config = ConfigInner {
            external_bot_ids: " , ".to_string(),
            ..Default::default()
        };

        assert!(config.external_bots().is_empty());
    }
}
