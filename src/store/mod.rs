// Copyright (c) 2025 - Cowboy AI, Inc.
//! Storage Collaborator Contracts
//!
//! The registries persist records through these traits and nothing else,
//! so any backing technology satisfying the contract can be swapped in
//! without touching the registries or the engine.
//!
//! # Contract
//!
//! ```text
//! insert(record) → Inserted | Duplicate
//! get(id)        → Some(record) | None
//! list(limit)    → records in insertion order
//! ping()         → Ok | InfrastructureError
//! ```
//!
//! "Not found" and "duplicate" are ordinary outcomes, never errors. A
//! [`InfrastructureError`](crate::errors::InfrastructureError) means the store itself
//! failed and is surfaced to the caller unchanged.

use async_trait::async_trait;

use crate::domain::{Event, EventId, User, UserId};
use crate::errors::InfrastructureResult;

pub mod memory;

pub use memory::{InMemoryEventRepository, InMemoryUserRepository};

/// Outcome of an insert against a keyed store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Record stored
    Inserted,
    /// A record with the same key already exists; nothing was written
    Duplicate,
}

/// Keyed storage for [`User`] records
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a user unless its id is taken
    ///
    /// The existence check and the write must be atomic with respect to
    /// concurrent inserts of the same id.
    async fn insert(&self, user: User) -> InfrastructureResult<InsertOutcome>;

    /// Look up a user by id
    async fn get(&self, id: &UserId) -> InfrastructureResult<Option<User>>;

    /// Up to `limit` users in insertion order
    async fn list(&self, limit: usize) -> InfrastructureResult<Vec<User>>;

    /// Verify the store is reachable
    async fn ping(&self) -> InfrastructureResult<()>;
}

/// Keyed storage for [`Event`] records
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store an event unless its id is taken
    async fn insert(&self, event: Event) -> InfrastructureResult<InsertOutcome>;

    /// Look up an event by id
    async fn get(&self, id: &EventId) -> InfrastructureResult<Option<Event>>;

    /// Up to `limit` events in insertion order
    async fn list(&self, limit: usize) -> InfrastructureResult<Vec<Event>>;

    /// Verify the store is reachable
    async fn ping(&self) -> InfrastructureResult<()>;
}
