// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-event registration state
//!
//! An [`EventRoster`] holds one Event's seats, its FIFO waitlist, and the
//! per-event slice of the user→status cross-index. It has no interior
//! synchronization: the engine keeps each roster behind that event's own
//! mutex and only calls in here while holding it.
//!
//! Every mutating method decides the whole outcome first (through the
//! [`RegistrationStatus`] state machine) and only then touches the
//! containers, so a rejected request leaves the roster exactly as it was.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::domain::{Capacity, Event, EventId, UserId};
use crate::state_machine::{
    RegistrationInput, RegistrationStatus, RosterChange, StateInvariant, StateMachine,
    TransitionResult,
};

/// Outcome of a successful unregister
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unregistration {
    /// Status the user held before leaving
    pub previous: RegistrationStatus,

    /// Waitlisted user moved into the freed seat, if any
    pub promoted: Option<UserId>,
}

/// Point-in-time copy of an event's roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    /// The Event this roster belongs to
    pub event_id: EventId,

    /// Maximum registered count
    pub capacity: Capacity,

    /// Whether overflow queues on the waitlist
    pub has_waitlist: bool,

    /// Registered users, sorted by id
    pub registered: Vec<UserId>,

    /// Waitlisted users, head first
    pub waitlist: Vec<UserId>,

    /// Seats still free
    pub available: u32,
}

/// Registration state of a single Event
#[derive(Debug, Clone)]
pub struct EventRoster {
    event_id: EventId,
    capacity: Capacity,
    has_waitlist: bool,
    registered: HashSet<UserId>,
    waitlist: VecDeque<UserId>,
    /// Cross-index slice: status of every user associated with this event
    statuses: HashMap<UserId, RegistrationStatus>,
}

impl EventRoster {
    /// Empty roster for an event
    pub fn new(event: &Event) -> Self {
        Self {
            event_id: event.id.clone(),
            capacity: event.capacity,
            has_waitlist: event.has_waitlist,
            registered: HashSet::new(),
            waitlist: VecDeque::new(),
            statuses: HashMap::new(),
        }
    }

    /// The Event this roster belongs to
    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Current status of a user
    pub fn status(&self, user_id: &UserId) -> RegistrationStatus {
        self.statuses.get(user_id).copied().unwrap_or_default()
    }

    /// Number of registered users
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// Number of waitlisted users
    pub fn waitlist_len(&self) -> usize {
        self.waitlist.len()
    }

    /// 1-indexed waitlist position, or `None` if the user is not waitlisted
    pub fn waitlist_position(&self, user_id: &UserId) -> Option<usize> {
        if self.status(user_id) != RegistrationStatus::Waitlisted {
            return None;
        }
        self.waitlist
            .iter()
            .position(|queued| queued == user_id)
            .map(|index| index + 1)
    }

    /// Admit a user to a seat, or to the waitlist tail when full
    ///
    /// Returns the user's new status.
    pub fn register(&mut self, user_id: &UserId) -> TransitionResult<RegistrationStatus> {
        let input = RegistrationInput::Register {
            seat_available: self.registered.len() < self.capacity.as_usize(),
            has_waitlist: self.has_waitlist,
        };
        let (next, change) = self.status(user_id).transition(&input)?;

        self.apply(user_id, change);
        self.set_status(user_id, next);
        Ok(next)
    }

    /// Remove a user, promoting the waitlist head into a freed seat
    ///
    /// The departure and the promotion happen in one call; there is no
    /// state in between for another caller to observe.
    pub fn unregister(&mut self, user_id: &UserId) -> TransitionResult<Unregistration> {
        let previous = self.status(user_id);
        let (next, change) = previous.transition(&RegistrationInput::Unregister)?;

        let promotion = match (change, self.waitlist.front()) {
            (RosterChange::ReleaseSeat, Some(head)) => {
                let head = head.clone();
                let (promoted, fill) = self
                    .status(&head)
                    .transition(&RegistrationInput::Promote)?;
                Some((head, promoted, fill))
            }
            _ => None,
        };

        self.apply(user_id, change);
        self.set_status(user_id, next);

        let promoted = promotion.map(|(head, status, fill)| {
            self.apply(&head, fill);
            self.set_status(&head, status);
            head
        });

        Ok(Unregistration { previous, promoted })
    }

    /// Copy the roster for readers
    pub fn snapshot(&self) -> RosterSnapshot {
        let mut registered: Vec<UserId> = self.registered.iter().cloned().collect();
        registered.sort();

        let occupied = u32::try_from(self.registered.len()).unwrap_or(u32::MAX);

        RosterSnapshot {
            event_id: self.event_id.clone(),
            capacity: self.capacity,
            has_waitlist: self.has_waitlist,
            registered,
            waitlist: self.waitlist.iter().cloned().collect(),
            available: self.capacity.get().saturating_sub(occupied),
        }
    }

    fn apply(&mut self, user_id: &UserId, change: RosterChange) {
        match change {
            RosterChange::TakeSeat => {
                self.registered.insert(user_id.clone());
            }
            RosterChange::JoinWaitlist => self.waitlist.push_back(user_id.clone()),
            RosterChange::ReleaseSeat => {
                self.registered.remove(user_id);
            }
            RosterChange::LeaveWaitlist => self.waitlist.retain(|queued| queued != user_id),
            RosterChange::FillSeat => {
                // Promote only ever targets the current head
                if self.waitlist.front() == Some(user_id) {
                    self.waitlist.pop_front();
                }
                self.registered.insert(user_id.clone());
            }
        }
    }

    fn set_status(&mut self, user_id: &UserId, status: RegistrationStatus) {
        if status == RegistrationStatus::None {
            self.statuses.remove(user_id);
        } else {
            self.statuses.insert(user_id.clone(), status);
        }
    }
}

impl StateInvariant for EventRoster {
    fn check_invariants(&self) -> Result<(), String> {
        if self.registered.len() > self.capacity.as_usize() {
            return Err(format!(
                "{} registered exceeds capacity {}",
                self.registered.len(),
                self.capacity
            ));
        }

        if !self.has_waitlist && !self.waitlist.is_empty() {
            return Err("waitlist populated on an event without waitlist".to_string());
        }

        let mut queued = HashSet::new();
        for user_id in &self.waitlist {
            if !queued.insert(user_id) {
                return Err(format!("{user_id} queued twice"));
            }
            if self.registered.contains(user_id) {
                return Err(format!("{user_id} both registered and waitlisted"));
            }
        }

        let indexed_registered = self
            .statuses
            .values()
            .filter(|status| **status == RegistrationStatus::Registered)
            .count();
        if indexed_registered != self.registered.len()
            || self.statuses.len() != self.registered.len() + self.waitlist.len()
        {
            return Err("status index disagrees with containers".to_string());
        }

        for user_id in &self.registered {
            if self.status(user_id) != RegistrationStatus::Registered {
                return Err(format!("{user_id} registered without index entry"));
            }
        }
        for user_id in &self.waitlist {
            if self.status(user_id) != RegistrationStatus::Waitlisted {
                return Err(format!("{user_id} waitlisted without index entry"));
            }
        }

        Ok(())
    }
}
