use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::BridgeError;

pub const CONFIG_PATH_ENV: &str = "WIDGETWIRE_CONFIG";
pub const BASE_PATH_ENV: &str = "WIDGETWIRE_BASE_PATH";
pub const FEED_PATH_ENV: &str = "WIDGETWIRE_FEED_PATH";
pub const CLIENT_CALL_ENV: &str = "WIDGETWIRE_CLIENT_CALL";
pub const THROTTLE_MS_ENV: &str = "WIDGETWIRE_THROTTLE_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Path callback requests are sent to.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_feed_path")]
    pub feed_path: String,
    /// Client function issuing the asynchronous GET: `call(url)`.
    #[serde(default = "default_client_call")]
    pub client_call: String,
    /// Throttle applied to callbacks that set none. 0 disables it.
    #[serde(default)]
    pub default_throttle_ms: u64,
}

fn default_base_path() -> String {
    "/widgetwire/callback".to_string()
}

fn default_feed_path() -> String {
    "/widgetwire/feed".to_string()
}

fn default_client_call() -> String {
    "widgetwire.get".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            feed_path: default_feed_path(),
            client_call: default_client_call(),
            default_throttle_ms: 0,
        }
    }
}

impl BridgeConfig {
    /// Defaults, then the file named by `WIDGETWIRE_CONFIG`, then env overrides.
    pub fn load() -> Result<Self, BridgeError> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BridgeError> {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) if !path.trim().is_empty() => Self::from_json_file(path.trim())?,
            _ => Self::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::Config(format!("failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| BridgeError::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Blank values are ignored.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), BridgeError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(value) = get(BASE_PATH_ENV) {
            self.base_path = value;
        }
        if let Some(value) = get(FEED_PATH_ENV) {
            self.feed_path = value;
        }
        if let Some(value) = get(CLIENT_CALL_ENV) {
            self.client_call = value;
        }
        if let Some(value) = get(THROTTLE_MS_ENV) {
            self.default_throttle_ms = value.trim().parse().map_err(|_| {
                BridgeError::Config(format!("{THROTTLE_MS_ENV} is not a number: {value}"))
            })?;
        }
        Ok(())
    }
}
