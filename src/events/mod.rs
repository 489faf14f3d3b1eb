// Copyright (c) 2025 - Cowboy AI, Inc.
//! Registration Events
//!
//! Immutable facts describing committed roster changes. The engine
//! publishes them on a broadcast feed from inside the event's critical
//! section, so for any one Event the feed order is the order in which the
//! changes took effect.
//!
//! # Causation
//!
//! ```text
//! Unregistered (u1)
//!   event_id: evt-1
//!   ↓
//! Promoted (u3)
//!   causation_id: evt-1
//! ```

pub mod registration;

pub use registration::{RegistrationChange, RegistrationEvent};
