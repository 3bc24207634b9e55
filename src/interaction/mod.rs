//! Event handling for the review-relay.
//!
//! This module provides the per-request processing steps:
//! - Shape validation of inbound bodies
//! - Notification composition
//! - The sequential relay pipeline (dedup, resolve, dispatch, record)

pub mod compose;
pub mod review_request;
pub mod validate;
