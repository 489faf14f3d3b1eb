// Copyright (c) 2025 - Cowboy AI, Inc.
//! User registry

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::EngineConfig;
use crate::domain::invariants::{normalize_identifier, normalize_name, validate_list_limit};
use crate::domain::{User, UserId};
use crate::errors::{InfrastructureResult, RegistrationError, RegistrationResult};
use crate::store::{InMemoryUserRepository, InsertOutcome, UserRepository};

/// Owns User identity records
pub struct UserRegistry {
    repository: Arc<dyn UserRepository>,
    config: Arc<EngineConfig>,
}

impl UserRegistry {
    /// Create a registry over the given repository
    pub fn new(repository: Arc<dyn UserRepository>, config: Arc<EngineConfig>) -> Self {
        Self { repository, config }
    }

    /// Create a registry backed by process memory
    pub fn in_memory(config: Arc<EngineConfig>) -> Self {
        Self::new(Arc::new(InMemoryUserRepository::new()), config)
    }

    /// Create a user
    ///
    /// # Errors
    /// - `InvalidInput` if `id` or `name` is empty, or `name` is too long
    /// - `DuplicateUser` if `id` is taken
    #[instrument(skip(self))]
    pub async fn create(&self, id: &str, name: &str) -> RegistrationResult<User> {
        let id = UserId::new(normalize_identifier(id, "user id")?);
        let name = normalize_name(name, self.config.max_name_length)?;

        let user = User {
            id,
            name,
            created_at: Utc::now(),
        };

        match self.repository.insert(user.clone()).await? {
            InsertOutcome::Inserted => {
                info!(user_id = %user.id, "Created user");
                Ok(user)
            }
            InsertOutcome::Duplicate => {
                warn!(user_id = %user.id, "Rejected duplicate user");
                Err(RegistrationError::DuplicateUser(user.id))
            }
        }
    }

    /// Look up a user; absence is not an error
    pub async fn get(&self, id: &UserId) -> RegistrationResult<Option<User>> {
        let user = self.repository.get(id).await?;
        debug!(user_id = %id, found = user.is_some(), "Looked up user");
        Ok(user)
    }

    /// Up to `limit` users in creation order
    ///
    /// # Errors
    /// - `InvalidInput` if `limit` is zero or above the configured maximum
    pub async fn list(&self, limit: usize) -> RegistrationResult<Vec<User>> {
        let limit = validate_list_limit(limit, self.config.max_list_limit)?;
        Ok(self.repository.list(limit).await?)
    }

    /// Users in creation order, using the configured default page size
    pub async fn list_default(&self) -> RegistrationResult<Vec<User>> {
        self.list(self.config.default_list_limit).await
    }

    /// Check the backing repository
    pub async fn ping(&self) -> InfrastructureResult<()> {
        self.repository.ping().await
    }
}
