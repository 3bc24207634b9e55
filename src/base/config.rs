//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default address the HTTP listener binds to.
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Default store namespace to use.
fn default_store_namespace() -> String {
    "relay".to_string()
}

/// Default store database to use.
fn default_store_database() -> String {
    "reviews".to_string()
}

/// Configuration for the review-relay application.
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
    /// Store endpoint URL (`STORE_ENDPOINT`), e.g. `ws://localhost:8000`.
    pub store_endpoint: String,
    /// Store username (`STORE_USERNAME`).
    pub store_username: String,
    /// Store password (`STORE_PASSWORD`).
    pub store_password: String,
    /// Store namespace (`STORE_NAMESPACE`).
    #[serde(default = "default_store_namespace")]
    pub store_namespace: String,
    /// Store database (`STORE_DATABASE`).
    #[serde(default = "default_store_database")]
    pub store_database: String,
    /// Chat incoming-webhook URL (`WEBHOOK_URL`).
    pub webhook_url: String,
    /// Shared secret expected in the inbound credential header (`RELAY_SECRET`).
    pub relay_secret: String,
    /// Address the HTTP listener binds to (`BIND_ADDR`).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("REVIEW_RELAY"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.relay_secret.is_empty() {
            return Err(anyhow::anyhow!("Relay secret must not be empty."));
        }

        if result.webhook_url.is_empty() {
            return Err(anyhow::anyhow!("Webhook URL must not be empty."));
        }

        Ok(result)
    }
}
