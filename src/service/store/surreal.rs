//! SurrealDB implementation for review-relay persistence.

use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{Res, Void},
};

use super::{GenericStoreClient, ProcessedPullRequest, StoreClient, UserIdentity};

// Extra constructors on `StoreClient` provided by the surreal implementation.

impl StoreClient {
    /// Creates a new SurrealDB-backed store client from the configuration.
    pub async fn surreal(config: &Config) -> Res<Self> {
        let client = SurrealStoreClient::new(config).await?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Creates an in-memory store client, used by tests.
    pub async fn surreal_memory() -> Res<Self> {
        let client = SurrealStoreClient::memory().await?;
        Ok(Self::new(Arc::new(client)))
    }
}

// Structs.

/// SurrealDB store implementation.
#[derive(Clone)]
pub struct SurrealStoreClient {
    db: Surreal<Any>,
}

impl SurrealStoreClient {
    /// Create a new store client connected to the configured endpoint.
    #[instrument(skip_all)]
    pub async fn new(config: &Config) -> Res<Self> {
        let db = any::connect(&config.store_endpoint).await?;

        // Authenticate with the store using the provided username and password.
        db.signin(Root {
            username: &config.store_username,
            password: &config.store_password,
        })
        .await?;

        db.use_ns(&config.store_namespace).use_db(&config.store_database).await?;

        Self::define_schema(&db).await?;

        info!("Store initialized successfully.");

        Ok(Self { db })
    }

    /// Create an in-memory store, for tests.
    pub async fn memory() -> Res<Self> {
        let db = any::connect("mem://").await?;
        db.use_ns("relay").use_db("reviews").await?;

        Self::define_schema(&db).await?;

        Ok(Self { db })
    }

    async fn define_schema(db: &Surreal<Any>) -> Void {
        // The processed table is insert-only from this system; the identity
        // map is maintained externally and only read here.
        db.query("DEFINE TABLE IF NOT EXISTS processed_pull_request SCHEMALESS").await?;
        db.query("DEFINE TABLE IF NOT EXISTS user_identity SCHEMALESS").await?;

        Ok(())
    }

    /// Seed an identity-map row. Test helper; production rows are managed
    /// out of band.
    pub async fn add_identity(&self, identity: &UserIdentity) -> Void {
        let _: Option<UserIdentity> = self.db.create("user_identity").content(identity.clone()).await?;

        Ok(())
    }
}

#[async_trait]
impl GenericStoreClient for SurrealStoreClient {
    #[instrument(skip(self))]
    async fn find_processed(&self, repository: &str, pr_id: i64) -> Res<Option<ProcessedPullRequest>> {
        let mut response = self
            .db
            .query("SELECT * FROM processed_pull_request WHERE repository = $repository AND pr_id = $pr_id LIMIT 1")
            .bind(("repository", repository.to_string()))
            .bind(("pr_id", pr_id))
            .await?;

        let record: Option<ProcessedPullRequest> = response.take(0)?;

        Ok(record)
    }

    #[instrument(skip(self, record))]
    async fn record_processed(&self, record: &ProcessedPullRequest) -> Void {
        let _: Option<ProcessedPullRequest> = self.db.create("processed_pull_request").content(record.clone()).await?;

        info!("Recorded `{}#{}` as processed.", record.repository, record.pr_id);

        Ok(())
    }

    #[instrument(skip(self))]
    async fn resolve_chat_handles(&self, reviewers: &[String]) -> Res<Vec<String>> {
        let mut response = self
            .db
            .query("SELECT * FROM user_identity WHERE source_id IN $reviewers")
            .bind(("reviewers", reviewers.to_vec()))
            .await?;

        let identities: Vec<UserIdentity> = response.take(0)?;

        Ok(identities.into_iter().filter_map(|identity| identity.chat_handle).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(repository: &str, pr_id: i64) -> ProcessedPullRequest {
        ProcessedPullRequest {
            repository: repository.to_string(),
            pr_id,
            pr_url: format!("https://example.com/{repository}/pull/{pr_id}"),
            pr_title: "Test PR".to_string(),
            category: Some("feature".to_string()),
            notified_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn find_processed_distinguishes_absent_from_present() {
        let store = SurrealStoreClient::memory().await.unwrap();

        assert!(store.find_processed("acme/widgets", 42).await.unwrap().is_none());

        store.record_processed(&record("acme/widgets", 42)).await.unwrap();

        let found = store.find_processed("acme/widgets", 42).await.unwrap().unwrap();
        assert_eq!(found.repository, "acme/widgets");
        assert_eq!(found.pr_id, 42);

        // Same id in a different repository is a different pull request.
        assert!(store.find_processed("acme/gadgets", 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resolve_chat_handles_drops_unmapped_reviewers() {
        let store = SurrealStoreClient::memory().await.unwrap();

        store
            .add_identity(&UserIdentity {
                source_id: "alice".to_string(),
                chat_handle: Some("U0001".to_string()),
            })
            .await
            .unwrap();
        store
            .add_identity(&UserIdentity {
                source_id: "bob".to_string(),
                chat_handle: None,
            })
            .await
            .unwrap();

        let handles = store
            .resolve_chat_handles(&["alice".to_string(), "bob".to_string(), "carol".to_string()])
            .await
            .unwrap();

        assert_eq!(handles, vec!["U0001".to_string()]);
    }
}
