// Copyright (c) 2025 - Cowboy AI, Inc.
//! Registration Lifecycle State Machine
//!
//! FSM for a single (user, event) pair. Uses the generic [`StateMachine`]
//! trait from the parent module.
//!
//! # States
//!
//! - None: no association (initial)
//! - Registered: holds a seat
//! - Waitlisted: queued behind the seats
//!
//! There is no terminal state; a pair can cycle indefinitely.
//!
//! # Inputs
//!
//! - Register: None → Registered (seat free) | Waitlisted (full, waitlist on)
//! - Unregister: Registered | Waitlisted → None
//! - Promote: Waitlisted → Registered (only as a side effect of another
//!   user's departure)
//!
//! # Outputs
//!
//! The [`RosterChange`] the engine must apply to the event's containers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};

/// Status of a (user, event) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    /// No association
    #[default]
    None,

    /// Holds one of the event's seats
    Registered,

    /// Queued on the event's waitlist
    Waitlisted,
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RegistrationStatus::None => "unregistered",
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Waitlisted => "waitlisted",
        };
        f.write_str(label)
    }
}

/// Lifecycle input (FSM input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationInput {
    /// Ask for a seat
    Register {
        /// Whether the event has a free seat right now
        seat_available: bool,
        /// Whether the event queues overflow
        has_waitlist: bool,
    },

    /// Give up a seat or waitlist slot
    Unregister,

    /// Move from the waitlist head into a freed seat
    Promote,
}

/// Container mutation decided by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterChange {
    /// Insert into the registered set
    TakeSeat,
    /// Append to the waitlist tail
    JoinWaitlist,
    /// Remove from the registered set, freeing a seat
    ReleaseSeat,
    /// Remove from the waitlist, preserving the order of the rest
    LeaveWaitlist,
    /// Pop from the waitlist head into the registered set
    FillSeat,
}

impl StateMachine for RegistrationStatus {
    type Input = RegistrationInput;
    type Output = RosterChange;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use RegistrationInput::*;
        use RegistrationStatus::*;

        match (self, input) {
            (
                None,
                Register {
                    seat_available: true,
                    ..
                },
            ) => Ok((Registered, RosterChange::TakeSeat)),
            (
                None,
                Register {
                    seat_available: false,
                    has_waitlist: true,
                },
            ) => Ok((Waitlisted, RosterChange::JoinWaitlist)),
            (
                None,
                Register {
                    seat_available: false,
                    has_waitlist: false,
                },
            ) => Err(TransitionError::NoCapacity),
            (Registered | Waitlisted, Register { .. }) => {
                Err(TransitionError::AlreadyAssociated(*self))
            }

            (Registered, Unregister) => Ok((None, RosterChange::ReleaseSeat)),
            (Waitlisted, Unregister) => Ok((None, RosterChange::LeaveWaitlist)),
            (None, Unregister) => Err(TransitionError::NotAssociated),

            (Waitlisted, Promote) => Ok((Registered, RosterChange::FillSeat)),
            (None | Registered, Promote) => Err(TransitionError::InvalidTransition {
                from: self.to_string(),
                to: Registered.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(seat_available: bool, has_waitlist: bool) -> RegistrationInput {
        RegistrationInput::Register {
            seat_available,
            has_waitlist,
        }
    }

    #[test]
    fn test_register_takes_free_seat() {
        let (next, change) = RegistrationStatus::None
            .transition(&register(true, false))
            .unwrap();
        assert_eq!(next, RegistrationStatus::Registered);
        assert_eq!(change, RosterChange::TakeSeat);
    }

    #[test]
    fn test_register_when_full() {
        let (next, change) = RegistrationStatus::None
            .transition(&register(false, true))
            .unwrap();
        assert_eq!(next, RegistrationStatus::Waitlisted);
        assert_eq!(change, RosterChange::JoinWaitlist);

        assert_eq!(
            RegistrationStatus::None.transition(&register(false, false)),
            Err(TransitionError::NoCapacity)
        );
    }

    #[test]
    fn test_register_twice_is_rejected() {
        for status in [RegistrationStatus::Registered, RegistrationStatus::Waitlisted] {
            assert_eq!(
                status.transition(&register(true, true)),
                Err(TransitionError::AlreadyAssociated(status))
            );
        }
    }

    #[test]
    fn test_unregister() {
        assert_eq!(
            RegistrationStatus::Registered.transition(&RegistrationInput::Unregister),
            Ok((RegistrationStatus::None, RosterChange::ReleaseSeat))
        );
        assert_eq!(
            RegistrationStatus::Waitlisted.transition(&RegistrationInput::Unregister),
            Ok((RegistrationStatus::None, RosterChange::LeaveWaitlist))
        );
        assert!(!RegistrationStatus::None.can_transition(&RegistrationInput::Unregister));
    }

    #[test]
    fn test_only_waitlisted_can_be_promoted() {
        assert!(RegistrationStatus::Waitlisted.can_transition(&RegistrationInput::Promote));
        assert!(!RegistrationStatus::None.can_transition(&RegistrationInput::Promote));
        assert!(!RegistrationStatus::Registered.can_transition(&RegistrationInput::Promote));
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&RegistrationStatus::Waitlisted).unwrap();
        assert_eq!(json, "\"WAITLISTED\"");
    }
}
