// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for registration operations
//!
//! Two families live here:
//!
//! - [`RegistrationError`] - expected business outcomes (not found, conflict,
//!   bad input) reported to the immediate caller. None of them leave state
//!   partially mutated.
//! - [`InfrastructureError`] - failures of a storage collaborator or of the
//!   configuration. Surfaced unchanged; the engine never retries them.

use thiserror::Error;

use crate::domain::{EventId, UserId};
use crate::state_machine::RegistrationStatus;

/// Infrastructure failures outside the business taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfrastructureError {
    /// Backing store cannot be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic infrastructure error
    #[error("Storage error: {0}")]
    Generic(String),
}

/// Result type for infrastructure operations
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;

impl From<serde_json::Error> for InfrastructureError {
    fn from(err: serde_json::Error) -> Self {
        InfrastructureError::Serialization(err.to_string())
    }
}

/// Business outcomes of registry and engine operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Malformed identifier or name
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Capacity outside the accepted range
    #[error("Invalid capacity {0}: must be between 1 and the configured maximum")]
    InvalidCapacity(i64),

    /// A user with this id already exists
    #[error("User {0} already exists")]
    DuplicateUser(UserId),

    /// An event with this id already exists
    #[error("Event {0} already exists")]
    DuplicateEvent(EventId),

    /// Referenced user does not exist
    #[error("User {0} not found")]
    UserNotFound(UserId),

    /// Referenced event does not exist
    #[error("Event {0} not found")]
    EventNotFound(EventId),

    /// The pair is already registered or waitlisted
    #[error("User {user_id} is already {status} for event {event_id}")]
    AlreadyRegistered {
        user_id: UserId,
        event_id: EventId,
        status: RegistrationStatus,
    },

    /// No seat left and the event keeps no waitlist
    #[error("Event {0} is full")]
    EventFull(EventId),

    /// The pair has no registration to remove
    #[error("User {user_id} is not registered for event {event_id}")]
    NotRegistered { user_id: UserId, event_id: EventId },

    /// Storage collaborator failure
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

/// Result type for registration operations
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Coarse classification a transport layer maps onto its own status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Caller sent malformed input
    BadRequest,
    /// Referenced entity is missing
    NotFound,
    /// Request conflicts with current state
    Conflict,
    /// Infrastructure failure
    Unavailable,
}

impl RegistrationError {
    /// Classify this error for transport mapping
    pub fn class(&self) -> ErrorClass {
        match self {
            RegistrationError::InvalidInput(_) | RegistrationError::InvalidCapacity(_) => {
                ErrorClass::BadRequest
            }
            RegistrationError::UserNotFound(_) | RegistrationError::EventNotFound(_) => {
                ErrorClass::NotFound
            }
            RegistrationError::DuplicateUser(_)
            | RegistrationError::DuplicateEvent(_)
            | RegistrationError::AlreadyRegistered { .. }
            | RegistrationError::EventFull(_)
            | RegistrationError::NotRegistered { .. } => ErrorClass::Conflict,
            RegistrationError::Infrastructure(_) => ErrorClass::Unavailable,
        }
    }

    /// Whether this is an expected business outcome rather than an infrastructure failure
    pub fn is_business(&self) -> bool {
        !matches!(self, RegistrationError::Infrastructure(_))
    }
}
