pub mod webhook;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{ChatNotification, Void};

// Traits.

/// Generic "chat" trait that notification sinks must implement.
///
/// The relay only ever pushes one payload per request; there is no
/// conversation state to manage.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Delivers a notification to the chat platform.
    ///
    /// The send is fire-and-forget from the relay's point of view: once it
    /// succeeds there is no way to recall the message.
    async fn send(&self, notification: &ChatNotification) -> Void;
}

// Structs.

/// Chat client handle for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
