// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event configuration record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::EventId;

/// Maximum number of registered attendees, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Capacity(u32);

impl Capacity {
    /// Create a capacity, rejecting zero
    pub fn new(seats: u32) -> Option<Self> {
        (seats > 0).then_some(Self(seats))
    }

    /// Number of seats
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of seats as a collection length
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u32> for Capacity {
    type Error = String;

    fn try_from(seats: u32) -> Result<Self, Self::Error> {
        Self::new(seats).ok_or_else(|| "capacity must be greater than zero".to_string())
    }
}

impl From<Capacity> for u32 {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event attendees register for
///
/// Capacity and waitlist policy are fixed once the event is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier
    pub id: EventId,

    /// Display name (trimmed, non-empty)
    pub name: String,

    /// Maximum number of registered users
    pub capacity: Capacity,

    /// Whether overflow registrations queue on a waitlist
    pub has_waitlist: bool,

    /// When the registry accepted the record
    pub created_at: DateTime<Utc>,
}
