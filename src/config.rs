use config::{Config, ConfigError, Environment, File};
use habitpro_types::UpiPayment;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Web server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Directory served under `/static` (QR image, stylesheet)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            static_dir: default_static_dir(),
        }
    }
}

/// Contact store (backend) configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub url: String,
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

fn default_store_timeout() -> u64 {
    10
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Root application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub web: WebConfig,
    pub store: StoreConfig,
    /// UPI payee shown after a lead is captured
    #[serde(default)]
    pub payment: UpiPayment,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default config file
            .add_source(File::with_name("config/default").required(false))
            // Override with local config if present
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (prefix: HABITPRO_)
            // e.g., HABITPRO_STORE__URL, HABITPRO_WEB__PORT
            .add_source(
                Environment::with_prefix("HABITPRO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Initialize the global config singleton
    pub fn init() -> Result<&'static Self, ConfigError> {
        let config = Self::load()?;
        Ok(CONFIG.get_or_init(|| config))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_defaults_apply() {
        let config: AppConfig = Config::builder()
            .set_override("store.url", "http://localhost:4943")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.payment.upi_id, "shreekumaran@fam");
        assert_eq!(config.payment.amount, 29);
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.store.timeout(), Duration::from_secs(10));
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_payment_override() {
        let config: AppConfig = Config::builder()
            .set_override("store.url", "http://localhost:4943")
            .unwrap()
            .set_override("payment.upi_id", "shop@upi")
            .unwrap()
            .set_override("payment.payee_name", "Shop")
            .unwrap()
            .set_override("payment.amount", 49)
            .unwrap()
            .set_override("payment.currency", "INR")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.payment.display_amount(), "₹49");
        assert_eq!(config.payment.upi_id, "shop@upi");
    }
}
