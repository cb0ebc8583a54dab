//! Messenger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::MessengerError;
use crate::format::WebhookStyle;

/// Configuration for the messenger.
///
/// Can be loaded from a TOML file via [`MessengerConfig::from_toml_file`]
/// or built programmatically (e.g. for tests). Read once at startup and
/// never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessengerConfig {
    /// Master switch; when false the messenger installs no subscriptions.
    #[serde(default)]
    pub enabled: bool,

    /// Block explorer base URL used in transaction links.
    #[serde(default = "default_explorer")]
    pub explorer: String,

    /// Delegate usernames to notify for. Empty means all delegates.
    #[serde(default)]
    pub delegates: Vec<String>,

    /// Webhook identifiers to fire per event kind.
    #[serde(default)]
    pub events: EventHooks,

    /// Webhook endpoints, keyed by the identifiers used in `events`.
    #[serde(default = "default_webhooks")]
    pub webhooks: BTreeMap<String, WebhookConfig>,
}

/// Per-event-kind lists of webhook identifiers, all empty by default.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventHooks {
    #[serde(default)]
    pub vote: Vec<String>,

    #[serde(default)]
    pub unvote: Vec<String>,

    #[serde(default)]
    pub missed: Vec<String>,
}

/// A single webhook endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Endpoint URL to POST notifications to.
    pub url: String,

    /// Name of the single JSON field carrying the message.
    #[serde(default = "default_field")]
    pub field: String,

    /// Message style; unrecognized values fall back to the default
    /// templates.
    #[serde(rename = "type", default)]
    pub style: WebhookStyle,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_explorer() -> String {
    "https://explorer.ark.io".to_string()
}

fn default_field() -> String {
    "text".to_string()
}

fn default_webhooks() -> BTreeMap<String, WebhookConfig> {
    BTreeMap::from([
        (
            "slack".to_string(),
            WebhookConfig {
                url: String::new(),
                field: "text".to_string(),
                style: WebhookStyle::Slack,
            },
        ),
        (
            "discord".to_string(),
            WebhookConfig {
                url: String::new(),
                field: "content".to_string(),
                style: WebhookStyle::Discord,
            },
        ),
    ])
}

// ── Impl ───────────────────────────────────────────────────────────────

impl MessengerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, MessengerError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MessengerError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, MessengerError> {
        toml::from_str(s).map_err(|e| MessengerError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("MessengerConfig is always serializable to TOML")
    }

    /// Whether the given delegate passes the username filter.
    pub fn notifies_for(&self, delegate_username: &str) -> bool {
        self.delegates.is_empty() || self.delegates.iter().any(|d| d == delegate_username)
    }
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            explorer: default_explorer(),
            delegates: Vec::new(),
            events: EventHooks::default(),
            webhooks: default_webhooks(),
        }
    }
}
