// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-event lock table
//!
//! One `tokio::sync::Mutex` per Event, created on the Event's first
//! registration activity and kept for the life of the engine. Operations
//! on different events never contend; operations on the same event are
//! serialized in lock acquisition order (the mutex is fair).
//!
//! No operation holds more than one roster lock at a time, so there is no
//! lock ordering to get wrong.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::roster::EventRoster;
use crate::domain::{Event, EventId};

/// Shared handle to one event's guarded roster
pub type RosterHandle = Arc<Mutex<EventRoster>>;

/// Map from event id to its guarded roster
#[derive(Debug, Default)]
pub struct EventLocks {
    rosters: RwLock<HashMap<EventId, RosterHandle>>,
}

impl EventLocks {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster for `event`, created empty on first use
    pub async fn get_or_create(&self, event: &Event) -> RosterHandle {
        if let Some(handle) = self.rosters.read().await.get(&event.id) {
            return Arc::clone(handle);
        }

        let mut rosters = self.rosters.write().await;
        Arc::clone(
            rosters
                .entry(event.id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(EventRoster::new(event)))),
        )
    }

    /// Roster for `event_id` if it has seen any registration activity
    pub async fn get(&self, event_id: &EventId) -> Option<RosterHandle> {
        self.rosters.read().await.get(event_id).cloned()
    }

    /// Number of events with a roster
    pub async fn len(&self) -> usize {
        self.rosters.read().await.len()
    }

    /// Whether no event has a roster yet
    pub async fn is_empty(&self) -> bool {
        self.rosters.read().await.is_empty()
    }
}
