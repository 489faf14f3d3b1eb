// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Event Rosters
//!
//! Drives an [`EventRoster`] with random request sequences and compares it
//! step by step against a plain reference model of seats and a FIFO queue.

use chrono::Utc;
use event_registration::domain::{Capacity, Event, EventId, UserId};
use event_registration::engine::EventRoster;
use event_registration::state_machine::{RegistrationStatus, StateInvariant, TransitionError};
use proptest::prelude::*;
use std::collections::{BTreeSet, VecDeque};

// ============================================================================
// Reference Model
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Request {
    Register(u8),
    Unregister(u8),
}

/// Obviously-correct roster used as the oracle
struct Model {
    capacity: usize,
    has_waitlist: bool,
    registered: BTreeSet<UserId>,
    waitlist: VecDeque<UserId>,
}

impl Model {
    fn new(capacity: u32, has_waitlist: bool) -> Self {
        Self {
            capacity: capacity as usize,
            has_waitlist,
            registered: BTreeSet::new(),
            waitlist: VecDeque::new(),
        }
    }

    fn status(&self, user: &UserId) -> RegistrationStatus {
        if self.registered.contains(user) {
            RegistrationStatus::Registered
        } else if self.waitlist.contains(user) {
            RegistrationStatus::Waitlisted
        } else {
            RegistrationStatus::None
        }
    }

    fn register(&mut self, user: &UserId) -> Result<RegistrationStatus, TransitionError> {
        match self.status(user) {
            RegistrationStatus::None => {}
            held => return Err(TransitionError::AlreadyAssociated(held)),
        }
        if self.registered.len() < self.capacity {
            self.registered.insert(user.clone());
            Ok(RegistrationStatus::Registered)
        } else if self.has_waitlist {
            self.waitlist.push_back(user.clone());
            Ok(RegistrationStatus::Waitlisted)
        } else {
            Err(TransitionError::NoCapacity)
        }
    }

    fn unregister(&mut self, user: &UserId) -> Result<Option<UserId>, TransitionError> {
        match self.status(user) {
            RegistrationStatus::Registered => {
                self.registered.remove(user);
                let promoted = self.waitlist.pop_front();
                if let Some(head) = &promoted {
                    self.registered.insert(head.clone());
                }
                Ok(promoted)
            }
            RegistrationStatus::Waitlisted => {
                self.waitlist.retain(|queued| queued != user);
                Ok(None)
            }
            RegistrationStatus::None => Err(TransitionError::NotAssociated),
        }
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn request() -> impl Strategy<Value = Request> {
    prop_oneof![
        3 => (0u8..10).prop_map(Request::Register),
        2 => (0u8..10).prop_map(Request::Unregister),
    ]
}

fn request_sequence() -> impl Strategy<Value = Vec<Request>> {
    prop::collection::vec(request(), 0..120)
}

fn user(n: u8) -> UserId {
    UserId::new(format!("u{n}"))
}

fn roster(capacity: u32, has_waitlist: bool) -> EventRoster {
    EventRoster::new(&Event {
        id: EventId::from("prop"),
        name: "Property Event".to_string(),
        capacity: Capacity::new(capacity).unwrap(),
        has_waitlist,
        created_at: Utc::now(),
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Roster matches the reference model after every request
    ///
    /// Outcomes, seat sets, and queue order all agree, and the roster's
    /// own invariant check passes at each step.
    #[test]
    fn prop_roster_matches_model(
        capacity in 1u32..5,
        has_waitlist in any::<bool>(),
        requests in request_sequence(),
    ) {
        let mut actual = roster(capacity, has_waitlist);
        let mut model = Model::new(capacity, has_waitlist);

        for request in requests {
            match request {
                Request::Register(n) => {
                    let who = user(n);
                    prop_assert_eq!(actual.register(&who), model.register(&who));
                }
                Request::Unregister(n) => {
                    let who = user(n);
                    let got = actual.unregister(&who).map(|departure| departure.promoted);
                    prop_assert_eq!(got, model.unregister(&who));
                }
            }

            prop_assert_eq!(actual.check_invariants(), Ok(()));

            let snapshot = actual.snapshot();
            let expected_registered: Vec<UserId> = model.registered.iter().cloned().collect();
            let expected_waitlist: Vec<UserId> = model.waitlist.iter().cloned().collect();
            prop_assert_eq!(snapshot.registered, expected_registered);
            prop_assert_eq!(snapshot.waitlist, expected_waitlist);
        }
    }

    /// Property: Capacity is never exceeded
    #[test]
    fn prop_capacity_never_exceeded(
        capacity in 1u32..4,
        has_waitlist in any::<bool>(),
        requests in request_sequence(),
    ) {
        let mut actual = roster(capacity, has_waitlist);

        for request in requests {
            match request {
                Request::Register(n) => { let _ = actual.register(&user(n)); }
                Request::Unregister(n) => { let _ = actual.unregister(&user(n)); }
            }
            prop_assert!(actual.registered_count() <= capacity as usize);
        }
    }

    /// Property: No free seat while someone waits
    ///
    /// Whenever the waitlist is non-empty every seat is taken.
    #[test]
    fn prop_waitlist_implies_full(
        capacity in 1u32..4,
        requests in request_sequence(),
    ) {
        let mut actual = roster(capacity, true);

        for request in requests {
            match request {
                Request::Register(n) => { let _ = actual.register(&user(n)); }
                Request::Unregister(n) => { let _ = actual.unregister(&user(n)); }
            }
            if actual.waitlist_len() > 0 {
                prop_assert_eq!(actual.registered_count(), capacity as usize);
            }
        }
    }

    /// Property: Rejected requests leave the roster unchanged
    #[test]
    fn prop_rejections_have_no_effect(
        capacity in 1u32..4,
        has_waitlist in any::<bool>(),
        requests in request_sequence(),
    ) {
        let mut actual = roster(capacity, has_waitlist);

        for request in requests {
            let before = actual.snapshot();
            let rejected = match request {
                Request::Register(n) => actual.register(&user(n)).is_err(),
                Request::Unregister(n) => actual.unregister(&user(n)).is_err(),
            };
            if rejected {
                prop_assert_eq!(actual.snapshot(), before);
            }
        }
    }

    /// Property: Waitlist positions are 1-indexed and contiguous
    #[test]
    fn prop_waitlist_positions_contiguous(
        capacity in 1u32..3,
        requests in request_sequence(),
    ) {
        let mut actual = roster(capacity, true);
        for request in requests {
            match request {
                Request::Register(n) => { let _ = actual.register(&user(n)); }
                Request::Unregister(n) => { let _ = actual.unregister(&user(n)); }
            }
        }

        for (index, queued) in actual.snapshot().waitlist.iter().enumerate() {
            prop_assert_eq!(actual.waitlist_position(queued), Some(index + 1));
        }
        for n in 0u8..10 {
            let who = user(n);
            if actual.status(&who) != RegistrationStatus::Waitlisted {
                prop_assert_eq!(actual.waitlist_position(&who), None);
            }
        }
    }
}
