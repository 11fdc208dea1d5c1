use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Persisted admin console settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub store: StoreSettings,
    pub identity: IdentitySettings,
    /// Where exports are written; the current directory when unset
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub url: String,
    pub timeout_secs: u64,
}

/// Default contact store endpoint for a local deployment
pub const DEFAULT_STORE_URL: &str = "http://127.0.0.1:4943/api";

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_STORE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl StoreSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// OAuth client registration used for the device login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentitySettings {
    pub client_id: String,
    pub auth_url: String,
    pub token_url: String,
    pub device_auth_url: String,
    pub scopes: Vec<String>,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            client_id: "habitpro-admin".to_string(),
            auth_url: "https://id.habitpro.app/oauth/authorize".to_string(),
            token_url: "https://id.habitpro.app/oauth/token".to_string(),
            device_auth_url: "https://id.habitpro.app/oauth/device".to_string(),
            scopes: vec!["contacts:read".to_string()],
        }
    }
}
