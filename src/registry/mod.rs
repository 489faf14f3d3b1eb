// Copyright (c) 2025 - Cowboy AI, Inc.
//! Registries for User and Event records
//!
//! Each registry validates input, stamps the record, and delegates storage
//! to a repository trait object:
//!
//! ```text
//! create(raw input)
//!     ↓
//! validate + normalize (domain::invariants)
//!     ↓
//! Repository::insert → Inserted | Duplicate
//!     ↓
//! record | DuplicateUser / DuplicateEvent
//! ```
//!
//! Registries never mutate a record after creation and hold no
//! registration state; the [`engine`](crate::engine) only reads from them.

pub mod event;
pub mod user;

pub use event::EventRegistry;
pub use user::UserRegistry;
