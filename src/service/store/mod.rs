pub mod surreal;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::base::types::{Res, Void};

// Traits.

/// Generic store trait that persistence backends must implement.
///
/// The relay reads and writes two logical collections: processed
/// pull-request records (the dedup signal) and the reviewer identity map
/// (read-only from this system).
#[async_trait]
pub trait GenericStoreClient: Send + Sync + 'static {
    /// Looks up the processed record for `(repository, pr_id)`.
    ///
    /// `Ok(None)` is the "not yet notified" signal; any error means the
    /// dedup check itself failed and the request must abort.
    async fn find_processed(&self, repository: &str, pr_id: i64) -> Res<Option<ProcessedPullRequest>>;

    /// Inserts the processed record marking a pull request as notified.
    ///
    /// Called exactly once per successfully dispatched notification. The
    /// record is never mutated or deleted by the relay.
    async fn record_processed(&self, record: &ProcessedPullRequest) -> Void;

    /// Resolves reviewer identities to chat handles.
    ///
    /// Returns only the handles that exist in the identity map, in the
    /// store's return order. Unmapped reviewers are silently dropped.
    async fn resolve_chat_handles(&self, reviewers: &[String]) -> Res<Vec<String>>;
}

// Structs.

/// Store client for the relay.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<dyn GenericStoreClient>,
}

impl Deref for StoreClient {
    type Target = dyn GenericStoreClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl StoreClient {
    pub fn new(inner: Arc<dyn GenericStoreClient>) -> Self {
        Self { inner }
    }
}

// Rows.

/// A processed pull-request record in the store.
///
/// Unique by `(repository, pr_id)`; its existence is the sole dedup signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPullRequest {
    pub repository: String,
    pub pr_id: i64,
    pub pr_url: String,
    pub pr_title: String,
    pub category: Option<String>,
    pub notified_at: chrono::DateTime<chrono::Utc>,
}

/// A reviewer identity row, mapping a code-hosting identity to an
/// optional chat handle. Externally managed; the relay only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub source_id: String,
    pub chat_handle: Option<String>,
}
