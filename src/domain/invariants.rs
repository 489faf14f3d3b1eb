// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Record Invariants
//!
//! Field rules applied by the registries before a record reaches storage.
//! All functions are pure (no side effects) and either return the
//! normalized value or a detailed [`ValidationError`].
//!
//! # Rules
//!
//! - Identifiers are trimmed and must not be empty
//! - Names are trimmed, must not be empty, and are bounded in length
//! - Capacity lies in `1..=max_capacity`
//! - Listing limits lie in `1..=max_list_limit`

use super::Capacity;
use crate::errors::RegistrationError;

/// Validation result with detailed error information
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required text field is empty after trimming
    #[error("{field} cannot be empty or only whitespace")]
    Empty { field: &'static str },

    /// Text field exceeds its maximum length
    #[error("{field} exceeds maximum length of {max} characters: {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Capacity out of range
    #[error("Capacity {requested} outside 1..={max}")]
    CapacityOutOfRange { requested: i64, max: u32 },

    /// Listing limit out of range
    #[error("Limit {requested} outside 1..={max}")]
    LimitOutOfRange { requested: usize, max: usize },
}

impl From<ValidationError> for RegistrationError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::CapacityOutOfRange { requested, .. } => {
                RegistrationError::InvalidCapacity(requested)
            }
            other => RegistrationError::InvalidInput(other.to_string()),
        }
    }
}

/// Normalize an identifier
///
/// # Rules
/// - Surrounding whitespace is stripped
/// - Must not be empty
pub fn normalize_identifier(raw: &str, field: &'static str) -> ValidationResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_string())
}

/// Normalize a display name
///
/// # Rules
/// - Surrounding whitespace is stripped
/// - Must not be empty
/// - At most `max_length` characters (counted as chars, not bytes)
pub fn normalize_name(raw: &str, max_length: usize) -> ValidationResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "name" });
    }

    let length = trimmed.chars().count();
    if length > max_length {
        return Err(ValidationError::TooLong {
            field: "name",
            max: max_length,
            actual: length,
        });
    }

    Ok(trimmed.to_string())
}

/// Validate a requested capacity
///
/// # Rules
/// - Strictly positive
/// - No larger than `max_capacity`
pub fn validate_capacity(requested: i64, max_capacity: u32) -> ValidationResult<Capacity> {
    if requested <= 0 || requested > i64::from(max_capacity) {
        return Err(ValidationError::CapacityOutOfRange {
            requested,
            max: max_capacity,
        });
    }

    u32::try_from(requested)
        .ok()
        .and_then(Capacity::new)
        .ok_or(ValidationError::CapacityOutOfRange {
            requested,
            max: max_capacity,
        })
}

/// Validate a listing limit
pub fn validate_list_limit(requested: usize, max_limit: usize) -> ValidationResult<usize> {
    if requested == 0 || requested > max_limit {
        return Err(ValidationError::LimitOutOfRange {
            requested,
            max: max_limit,
        });
    }
    Ok(requested)
}
