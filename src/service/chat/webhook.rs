//! Incoming-webhook implementation of the chat client.
//!
//! Posts notification payloads as JSON to a configured webhook URL. The
//! webhook accepts either a plain `{text}` body or an `{attachments: [...]}`
//! body; both shapes are produced by the message composer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{ChatNotification, Void},
};

use super::{ChatClient, GenericChatClient};

// Extra constructors on `ChatClient` provided by the webhook implementation.

impl ChatClient {
    /// Creates a new webhook-backed chat client.
    pub fn webhook(config: &Config) -> Self {
        Self::new(Arc::new(WebhookChatClient::new(config)))
    }
}

// Structs.

/// Webhook chat client implementation.
#[derive(Clone)]
pub struct WebhookChatClient {
    webhook_url: String,
    client: reqwest::Client,
}

impl WebhookChatClient {
    /// Create a new webhook chat client.
    pub fn new(config: &Config) -> Self {
        Self {
            webhook_url: config.webhook_url.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl GenericChatClient for WebhookChatClient {
    #[instrument(skip_all)]
    async fn send(&self, notification: &ChatNotification) -> Void {
        let response = self.client.post(&self.webhook_url).json(notification).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Webhook responded with status {}.", response.status()));
        }

        info!("Notification delivered to webhook.");

        Ok(())
    }
}
