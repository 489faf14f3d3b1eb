// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event registration with capacity enforcement and waitlist promotion
//!
//! Users register for Events with finite capacity. Overflow queues on a
//! FIFO waitlist when the Event opts in, and a departure from a full Event
//! promotes the waitlist head atomically.
//!
//! # Modules
//!
//! - [`domain`] - User and Event records, identifiers, validation rules
//! - [`registry`] - create/get for Users and Events over a [`store`]
//! - [`engine`] - the registration engine and its per-event locking
//! - [`state_machine`] - lifecycle of a single (user, event) pair
//! - [`events`] - feed of committed roster changes
//!
//! # Concurrency
//!
//! Every event's state sits behind its own mutex. Operations on different
//! events run fully in parallel; operations on the same event are
//! linearizable.

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod events;
pub mod health;
pub mod registry;
pub mod state_machine;
pub mod store;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{RegistrationEngine, RosterSnapshot, Unregistration};
pub use errors::{
    ErrorClass, InfrastructureError, InfrastructureResult, RegistrationError, RegistrationResult,
};
pub use events::{RegistrationChange, RegistrationEvent};
pub use health::{HealthReport, HealthStatus};
pub use registry::{EventRegistry, UserRegistry};
pub use state_machine::RegistrationStatus;
