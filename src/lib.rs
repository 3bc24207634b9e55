//! Library root for `review-relay`.
//!
//! Review-relay bridges a code-hosting platform's review-request events to a
//! team chat webhook:
//! - Validates and authenticates inbound events
//! - Deduplicates against a persisted processed-record store
//! - Resolves reviewer identities to chat handles
//! - Composes a category-appropriate message and posts it to the webhook
//!
//! The relay integrates with SurrealDB for storage and a chat incoming
//! webhook for delivery. The architecture is built around extensible traits
//! that allow for different implementations of each service.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod server;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the relay:
/// - Creates the runtime context with store and chat clients
/// - Starts the HTTP listener for inbound events
pub async fn start(config: Config) -> Void {
    info!("Starting review-relay ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
