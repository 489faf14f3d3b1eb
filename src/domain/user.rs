// Copyright (c) 2025 - Cowboy AI, Inc.
//! User identity record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// A registered person
///
/// Immutable after creation. Only [`UserRegistry`](crate::registry::UserRegistry)
/// constructs validated instances; the fields are public so storage
/// collaborators can rebuild records they persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Display name (trimmed, non-empty)
    pub name: String,

    /// When the registry accepted the record
    pub created_at: DateTime<Utc>,
}
