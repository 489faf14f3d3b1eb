// Copyright (c) 2025 - Cowboy AI, Inc.
//! Registration & Waitlist Coordination Engine
//!
//! Owns every event's registration state and enforces two guarantees under
//! concurrent callers:
//!
//! 1. **Capacity**: an event never has more registered users than seats
//! 2. **Atomic promotion**: when a registered user leaves a full event, the
//!    waitlist head takes the seat in the same critical section
//!
//! # Architecture
//!
//! ```text
//! caller
//!   ↓
//! RegistrationEngine
//!   ├─ UserRegistry / EventRegistry   (existence checks, read only)
//!   ├─ EventLocks                     (one mutex per event)
//!   │    └─ EventRoster               (seats, waitlist, status slice)
//!   ├─ UserIndex                      (user → events, updated under roster lock)
//!   └─ broadcast feed                 (RegistrationEvent per committed change)
//! ```
//!
//! # Critical Sections
//!
//! Each operation resolves the referenced records first, then takes the
//! event's roster lock and performs its read-modify-write without awaiting
//! anything. A caller that gives up while waiting for the lock changes
//! nothing; once the lock is held the change always commits in full.
//!
//! # Example
//!
//! ```rust,no_run
//! use event_registration::{EngineConfig, RegistrationEngine, RegistrationStatus};
//! use event_registration::domain::{EventId, UserId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = RegistrationEngine::in_memory(EngineConfig::default());
//!     engine.users().create("u1", "Ada").await?;
//!     engine.events().create("e1", "RustConf", 1, true).await?;
//!
//!     let status = engine.register(&UserId::from("u1"), &EventId::from("e1")).await?;
//!     assert_eq!(status, RegistrationStatus::Registered);
//!     Ok(())
//! }
//! ```

pub mod index;
pub mod locks;
pub mod roster;

pub use index::UserIndex;
pub use locks::{EventLocks, RosterHandle};
pub use roster::{EventRoster, RosterSnapshot, Unregistration};

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::config::EngineConfig;
use crate::domain::{Event, EventId, User, UserId};
use crate::errors::{InfrastructureError, RegistrationError, RegistrationResult};
use crate::events::{RegistrationChange, RegistrationEvent};
use crate::health::{ComponentHealth, HealthReport};
use crate::registry::{EventRegistry, UserRegistry};
use crate::state_machine::{RegistrationStatus, StateInvariant, TransitionError};

/// Coordinates registrations and waitlists across all events
pub struct RegistrationEngine {
    users: Arc<UserRegistry>,
    events: Arc<EventRegistry>,
    locks: EventLocks,
    index: UserIndex,
    feed: broadcast::Sender<RegistrationEvent>,
}

impl RegistrationEngine {
    /// Create an engine reading from the given registries
    pub fn new(
        users: Arc<UserRegistry>,
        events: Arc<EventRegistry>,
        config: &EngineConfig,
    ) -> Self {
        let (feed, _) = broadcast::channel(config.feed_capacity);
        Self {
            users,
            events,
            locks: EventLocks::new(),
            index: UserIndex::new(),
            feed,
        }
    }

    /// Create an engine with in-memory registries
    pub fn in_memory(config: EngineConfig) -> Self {
        let config = Arc::new(config);
        let users = Arc::new(UserRegistry::in_memory(Arc::clone(&config)));
        let events = Arc::new(EventRegistry::in_memory(Arc::clone(&config)));
        Self::new(users, events, &config)
    }

    /// The user registry this engine validates against
    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// The event registry this engine validates against
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Receive every committed roster change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<RegistrationEvent> {
        self.feed.subscribe()
    }

    /// Register a user for an event
    ///
    /// Takes a seat if one is free, otherwise joins the waitlist tail when
    /// the event keeps one.
    ///
    /// # Errors
    /// - `UserNotFound` / `EventNotFound` if either record is missing
    /// - `AlreadyRegistered` if the user is registered or waitlisted already
    /// - `EventFull` if no seat is free and the event has no waitlist
    #[instrument(skip(self, user_id, event_id), fields(user_id = %user_id, event_id = %event_id))]
    pub async fn register(
        &self,
        user_id: &UserId,
        event_id: &EventId,
    ) -> RegistrationResult<RegistrationStatus> {
        self.require_user(user_id).await?;
        let event = self.require_event(event_id).await?;
        let handle = self.locks.get_or_create(&event).await;

        let outcome = {
            let mut roster = handle.lock().await;
            let outcome = roster.register(user_id);

            if let Ok(status) = outcome {
                self.index.record(user_id, event_id, status);

                let change = match status {
                    RegistrationStatus::Waitlisted => RegistrationChange::Waitlisted {
                        position: roster.waitlist_len(),
                    },
                    _ => RegistrationChange::Registered,
                };
                self.publish(RegistrationEvent::new(
                    event_id.clone(),
                    user_id.clone(),
                    change,
                    Utc::now(),
                ));
                debug_assert_eq!(roster.check_invariants(), Ok(()));
            }
            outcome
        };

        match outcome {
            Ok(status) => {
                info!(%status, "Registration accepted");
                Ok(status)
            }
            Err(err) => {
                let err = rejection(err, user_id, event_id);
                warn!(error = %err, "Registration rejected");
                Err(err)
            }
        }
    }

    /// Remove a user's registration or waitlist entry
    ///
    /// When a registered user leaves and the waitlist is non-empty, the
    /// head of the waitlist is promoted before the lock is released.
    ///
    /// # Errors
    /// - `UserNotFound` / `EventNotFound` if either record is missing
    /// - `NotRegistered` if the user holds neither a seat nor a waitlist slot
    #[instrument(skip(self, user_id, event_id), fields(user_id = %user_id, event_id = %event_id))]
    pub async fn unregister(
        &self,
        user_id: &UserId,
        event_id: &EventId,
    ) -> RegistrationResult<Unregistration> {
        self.require_user(user_id).await?;
        self.require_event(event_id).await?;

        let Some(handle) = self.locks.get(event_id).await else {
            let err = rejection(TransitionError::NotAssociated, user_id, event_id);
            warn!(error = %err, "Unregistration rejected");
            return Err(err);
        };

        let outcome = {
            let mut roster = handle.lock().await;
            let outcome = roster.unregister(user_id);

            if let Ok(departure) = &outcome {
                let now = Utc::now();
                self.index
                    .record(user_id, event_id, RegistrationStatus::None);

                let change = match departure.previous {
                    RegistrationStatus::Waitlisted => RegistrationChange::LeftWaitlist,
                    _ => RegistrationChange::Unregistered,
                };
                let left = RegistrationEvent::new(event_id.clone(), user_id.clone(), change, now);
                let cause = left.event_id;
                self.publish(left);

                if let Some(promoted) = &departure.promoted {
                    self.index
                        .record(promoted, event_id, RegistrationStatus::Registered);
                    self.publish(
                        RegistrationEvent::new(
                            event_id.clone(),
                            promoted.clone(),
                            RegistrationChange::Promoted,
                            now,
                        )
                        .caused_by(cause),
                    );
                }
                debug_assert_eq!(roster.check_invariants(), Ok(()));
            }
            outcome
        };

        match outcome {
            Ok(departure) => {
                info!(
                    previous = %departure.previous,
                    promoted = ?departure.promoted.as_ref().map(UserId::as_str),
                    "Unregistration accepted"
                );
                Ok(departure)
            }
            Err(err) => {
                let err = rejection(err, user_id, event_id);
                warn!(error = %err, "Unregistration rejected");
                Err(err)
            }
        }
    }

    /// Events the user currently holds a seat for, in id order
    ///
    /// Waitlisted entries are excluded. Each event's status is read under
    /// that event's lock.
    ///
    /// # Errors
    /// - `UserNotFound` if the user does not exist
    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    pub async fn get_user_registrations(&self, user_id: &UserId) -> RegistrationResult<Vec<EventId>> {
        self.require_user(user_id).await?;

        let mut registered = Vec::new();
        for event_id in self.index.events_for(user_id) {
            let Some(handle) = self.locks.get(&event_id).await else {
                continue;
            };
            if handle.lock().await.status(user_id) == RegistrationStatus::Registered {
                registered.push(event_id);
            }
        }

        debug!(count = registered.len(), "Listed user registrations");
        Ok(registered)
    }

    /// 1-indexed waitlist position, or `None` if the user is not waitlisted
    ///
    /// # Errors
    /// - `UserNotFound` / `EventNotFound` if either record is missing
    #[instrument(skip(self, user_id, event_id), fields(user_id = %user_id, event_id = %event_id))]
    pub async fn get_waitlist_position(
        &self,
        user_id: &UserId,
        event_id: &EventId,
    ) -> RegistrationResult<Option<usize>> {
        self.require_user(user_id).await?;
        self.require_event(event_id).await?;

        let position = match self.locks.get(event_id).await {
            Some(handle) => handle.lock().await.waitlist_position(user_id),
            None => None,
        };
        Ok(position)
    }

    /// Current status of a (user, event) pair
    ///
    /// # Errors
    /// - `UserNotFound` / `EventNotFound` if either record is missing
    pub async fn status(
        &self,
        user_id: &UserId,
        event_id: &EventId,
    ) -> RegistrationResult<RegistrationStatus> {
        self.require_user(user_id).await?;
        self.require_event(event_id).await?;

        let status = match self.locks.get(event_id).await {
            Some(handle) => handle.lock().await.status(user_id),
            None => RegistrationStatus::None,
        };
        Ok(status)
    }

    /// Copy of an event's seats and waitlist
    ///
    /// # Errors
    /// - `EventNotFound` if the event does not exist
    pub async fn roster(&self, event_id: &EventId) -> RegistrationResult<RosterSnapshot> {
        let event = self.require_event(event_id).await?;

        let snapshot = match self.locks.get(event_id).await {
            Some(handle) => handle.lock().await.snapshot(),
            None => EventRoster::new(&event).snapshot(),
        };
        Ok(snapshot)
    }

    /// Probe both registries' storage
    pub async fn health(&self) -> HealthReport {
        let users = ComponentHealth::from_probe(self.users.ping().await);
        let events = ComponentHealth::from_probe(self.events.ping().await);
        let active_events = self.locks.len().await;

        let report = HealthReport::new(users, events, active_events, Utc::now());
        debug!(status = ?report.status, active_events, "Health checked");
        report
    }

    async fn require_user(&self, user_id: &UserId) -> RegistrationResult<User> {
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| RegistrationError::UserNotFound(user_id.clone()))
    }

    async fn require_event(&self, event_id: &EventId) -> RegistrationResult<Event> {
        self.events
            .get(event_id)
            .await?
            .ok_or_else(|| RegistrationError::EventNotFound(event_id.clone()))
    }

    fn publish(&self, event: RegistrationEvent) {
        // Err only means nobody is subscribed
        let _ = self.feed.send(event);
    }
}

/// Map a refused transition onto the business taxonomy
fn rejection(err: TransitionError, user_id: &UserId, event_id: &EventId) -> RegistrationError {
    match err {
        TransitionError::AlreadyAssociated(status) => RegistrationError::AlreadyRegistered {
            user_id: user_id.clone(),
            event_id: event_id.clone(),
            status,
        },
        TransitionError::NoCapacity => RegistrationError::EventFull(event_id.clone()),
        TransitionError::NotAssociated => RegistrationError::NotRegistered {
            user_id: user_id.clone(),
            event_id: event_id.clone(),
        },
        // Only reachable if a roster's waitlist and status slice disagree
        TransitionError::InvalidTransition { from, to } => {
            RegistrationError::Infrastructure(InfrastructureError::Generic(format!(
                "roster for {event_id} refused transition from {from} to {to}"
            )))
        }
    }
}
