// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Generic state machine types for modeling registration lifecycles.
//! Transitions are pure functions with no side effects: they decide what
//! should happen, and the caller applies the decision to its containers.
//!
//! # State Machine Type
//!
//! A **Mealy Machine**: output depends on both current state and input.
//!
//! ```text
//! (State, Input) → (State, Output)
//! ```
//!
//! # Design Principles
//!
//! 1. **Type Safety**: States are strongly typed enums
//! 2. **Pure Functions**: All transitions are pure
//! 3. **Explicit**: All transitions explicitly defined

pub mod registration_lifecycle;

pub use registration_lifecycle::{RegistrationInput, RegistrationStatus, RosterChange};

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Transition from current state to target state is not allowed
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Pair already holds a seat or a waitlist slot
    #[error("Already {0}")]
    AlreadyAssociated(RegistrationStatus),

    /// No seat left and no waitlist to fall back on
    #[error("No capacity available")]
    NoCapacity,

    /// Pair holds neither a seat nor a waitlist slot
    #[error("Not associated")]
    NotAssociated,
}

/// Trait for finite state machines
///
/// Implement this trait to define a state machine with typed states,
/// inputs, and outputs.
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }
}

/// Trait for states with invariants
///
/// Checked after every mutation in debug builds and directly by tests.
pub trait StateInvariant {
    /// Check if state invariants hold
    fn check_invariants(&self) -> Result<(), String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Simple test FSM: On/Off switch
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Switch {
        Off,
        On,
    }

    enum SwitchInput {
        Press,
    }

    impl StateMachine for Switch {
        type Input = SwitchInput;
        type Output = ();

        fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
            match (self, input) {
                (Switch::Off, SwitchInput::Press) => Ok((Switch::On, ())),
                (Switch::On, SwitchInput::Press) => Ok((Switch::Off, ())),
            }
        }
    }

    #[test]
    fn test_simple_transition() {
        let switch = Switch::Off;
        let (new_state, _) = switch.transition(&SwitchInput::Press).unwrap();
        assert_eq!(new_state, Switch::On);
    }

    #[test]
    fn test_can_transition() {
        assert!(Switch::Off.can_transition(&SwitchInput::Press));
    }
}
