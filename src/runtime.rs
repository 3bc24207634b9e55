//! Runtime services and shared state for the review-relay.

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    server,
    service::{chat::ChatClient, store::StoreClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the store client, chat client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`, and is injected into every request
/// handler so the handlers stay testable in isolation.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The store client instance.
    pub store: StoreClient,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the store.
        let store = StoreClient::surreal(&config).await?;

        // Initialize the chat client.
        let chat = ChatClient::webhook(&config);

        Ok(Self { config, store, chat })
    }

    /// Start the HTTP listener.
    pub async fn start(&self) -> Void {
        server::serve(self.clone()).await
    }
}
