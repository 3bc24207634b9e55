//! The review-request pipeline.
//!
//! Runs the strictly sequential flow for one authenticated request:
//! validate, duplicate check, identity resolution, composition, dispatch,
//! record. Every step gates the next; every failure is terminal for the
//! request and mapped to a response status by the server layer.

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    base::types::{Err, ReviewRequestEvent},
    service::{chat::ChatClient, store::{ProcessedPullRequest, StoreClient}},
};

use super::{compose::compose, validate::{Violation, validate}};

/// Successful terminal states of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Notification dispatched and processed record inserted.
    Created,
    /// The pull request was already recorded; nothing was sent.
    AlreadyProcessed,
}

/// Failure terminal states of the pipeline.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The body failed shape validation.
    #[error("invalid input: {}", format_violations(.0))]
    InvalidInput(Vec<Violation>),

    /// No reviewer resolved to a chat handle; there is no one to notify.
    #[error("no resolvable recipients")]
    NoRecipients,

    /// The dedup check or identity lookup failed.
    #[error("store read failed: {0}")]
    StoreRead(Err),

    /// The webhook rejected or failed the delivery. The processed record is
    /// not inserted on this path, so a caller retry re-attempts the flow.
    #[error("dispatch failed: {0}")]
    Dispatch(Err),

    /// The insert failed after a successful dispatch. The message is
    /// already out; a caller retry will send it again.
    #[error("store write failed: {0}")]
    StoreWrite(Err),
}

fn format_violations(violations: &[Violation]) -> String {
    violations.iter().map(Violation::to_string).collect::<Vec<_>>().join("; ")
}

/// Handles one validated-credential review-request body.
///
/// The duplicate check and the final insert are not guarded by a
/// transaction: two concurrent identical events can both pass the check
/// and both dispatch.
#[instrument(skip_all)]
pub async fn handle_review_request(body: Value, store: &StoreClient, chat: &ChatClient) -> Result<RelayOutcome, RelayError> {
    let event = validate(&body).map_err(RelayError::InvalidInput)?;

    if let Some(existing) = store
        .find_processed(&event.repository, event.pr_id)
        .await
        .map_err(RelayError::StoreRead)?
    {
        info!("Pull request `{}#{}` already processed; skipping.", existing.repository, existing.pr_id);

        return Ok(RelayOutcome::AlreadyProcessed);
    }

    let handles = store.resolve_chat_handles(&event.reviewers).await.map_err(RelayError::StoreRead)?;

    if handles.is_empty() {
        warn!("No reviewer of `{}#{}` resolved to a chat handle.", event.repository, event.pr_id);

        return Err(RelayError::NoRecipients);
    }

    let notification = compose(&event, &handles);

    chat.send(&notification).await.map_err(RelayError::Dispatch)?;

    store.record_processed(&processed_record(&event)).await.map_err(RelayError::StoreWrite)?;

    info!("Notified {} reviewer(s) for `{}#{}`.", handles.len(), event.repository, event.pr_id);

    Ok(RelayOutcome::Created)
}

fn processed_record(event: &ReviewRequestEvent) -> ProcessedPullRequest {
    ProcessedPullRequest {
        repository: event.repository.clone(),
        pr_id: event.pr_id,
        pr_url: event.pr_url.clone(),
        pr_title: event.pr_title.clone(),
        category: event.category.map(|c| c.as_str().to_string()),
        notified_at: Utc::now(),
    }
}
