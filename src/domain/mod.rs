// Copyright (c) 2025 - Cowboy AI, Inc.
//! Registration Domain Models
//!
//! Records owned by the registries and the value objects they are built
//! from.
//!
//! # Records
//!
//! - [`User`] - identity of a person who can register
//! - [`Event`] - something with finite [`Capacity`] and an optional waitlist
//!
//! # Value Objects with Invariants
//!
//! - [`UserId`] / [`EventId`] - opaque string identifiers
//! - [`Capacity`] - seat count, always greater than zero
//!
//! Records are immutable once a registry has accepted them. Registration
//! state lives in the [`engine`](crate::engine), never on the records.

pub mod event;
pub mod ids;
pub mod invariants;
pub mod user;

pub use event::{Capacity, Event};
pub use ids::{EventId, UserId};
pub use invariants::{ValidationError, ValidationResult};
pub use user::User;
