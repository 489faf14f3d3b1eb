// Copyright (c) 2025 - Cowboy AI, Inc.
//! Registration Domain Events
//!
//! Every committed change to an event's roster is described by one
//! [`RegistrationEvent`]:
//! - Immutable once published
//! - Past tense naming (Registered, not Register)
//! - Causation links a promotion to the departure that freed its seat
//! - Versioned for schema evolution

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{EventId, UserId};

/// What happened to the (user, event) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistrationChange {
    /// User took a seat
    Registered,

    /// User joined the waitlist tail
    Waitlisted {
        /// 1-indexed position at the time of joining
        position: usize,
    },

    /// User gave up a seat
    Unregistered,

    /// User left the waitlist before being promoted
    LeftWaitlist,

    /// User moved from the waitlist head into a freed seat
    Promoted,
}

/// A committed roster change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEvent {
    /// Event version for schema evolution
    pub event_version: u32,

    /// Unique event identifier (UUID v7 for time ordering)
    pub event_id: Uuid,

    /// The Event whose roster changed
    pub aggregate_id: EventId,

    /// The user whose status changed
    pub user_id: UserId,

    /// When the change was committed
    pub timestamp: DateTime<Utc>,

    /// Event that caused this one (set on promotions)
    pub causation_id: Option<Uuid>,

    /// The change itself
    pub change: RegistrationChange,
}

impl RegistrationEvent {
    /// Current schema version
    pub const VERSION: u32 = 1;

    /// Create a new event with a fresh id
    pub fn new(
        aggregate_id: EventId,
        user_id: UserId,
        change: RegistrationChange,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            event_version: Self::VERSION,
            event_id: Uuid::now_v7(),
            aggregate_id,
            user_id,
            timestamp,
            causation_id: None,
            change,
        }
    }

    /// Link this event to the event that caused it
    pub fn caused_by(mut self, causation_id: Uuid) -> Self {
        self.causation_id = Some(causation_id);
        self
    }
}
