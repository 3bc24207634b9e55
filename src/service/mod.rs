//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by the relay:
//! - Chat delivery (incoming webhook)
//! - Persistence (SurrealDB)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod store;
