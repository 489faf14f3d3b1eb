// Copyright (c) 2025 - Cowboy AI, Inc.
//! User → event membership index
//!
//! Records, for each user, the events whose roster currently holds them
//! (registered or waitlisted). The authoritative status lives in each
//! [`EventRoster`](super::roster::EventRoster); this index only narrows
//! which rosters a per-user query must visit.
//!
//! Writers call in while holding the affected event's roster lock, so the
//! index moves in the same critical section as the roster it mirrors. The
//! inner lock is a synchronous leaf lock: it is never held across an await
//! and never held while acquiring a roster lock.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use crate::domain::{EventId, UserId};
use crate::state_machine::RegistrationStatus;

/// Events each user is associated with
#[derive(Debug, Default)]
pub struct UserIndex {
    memberships: RwLock<HashMap<UserId, BTreeSet<EventId>>>,
}

impl UserIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Reflect a user's new status for an event
    pub fn record(&self, user_id: &UserId, event_id: &EventId, status: RegistrationStatus) {
        let mut memberships = self
            .memberships
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if status == RegistrationStatus::None {
            if let Some(events) = memberships.get_mut(user_id) {
                events.remove(event_id);
                if events.is_empty() {
                    memberships.remove(user_id);
                }
            }
        } else {
            memberships
                .entry(user_id.clone())
                .or_default()
                .insert(event_id.clone());
        }
    }

    /// Events the user is associated with, in id order
    pub fn events_for(&self, user_id: &UserId) -> Vec<EventId> {
        self.memberships
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .map(|events| events.iter().cloned().collect())
            .unwrap_or_default()
    }
}
