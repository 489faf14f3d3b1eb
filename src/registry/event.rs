// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event registry

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::EngineConfig;
use crate::domain::invariants::{
    normalize_identifier, normalize_name, validate_capacity, validate_list_limit,
};
use crate::domain::{Event, EventId};
use crate::errors::{InfrastructureResult, RegistrationError, RegistrationResult};
use crate::store::{EventRepository, InMemoryEventRepository, InsertOutcome};

/// Owns Event configuration records
pub struct EventRegistry {
    repository: Arc<dyn EventRepository>,
    config: Arc<EngineConfig>,
}

impl EventRegistry {
    /// Create a registry over the given repository
    pub fn new(repository: Arc<dyn EventRepository>, config: Arc<EngineConfig>) -> Self {
        Self { repository, config }
    }

    /// Create a registry backed by process memory
    pub fn in_memory(config: Arc<EngineConfig>) -> Self {
        Self::new(Arc::new(InMemoryEventRepository::new()), config)
    }

    /// Create an event
    ///
    /// # Errors
    /// - `InvalidInput` if `id` or `name` is empty, or `name` is too long
    /// - `InvalidCapacity` if `capacity` is not in `1..=max_capacity`
    /// - `DuplicateEvent` if `id` is taken
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        id: &str,
        name: &str,
        capacity: i64,
        has_waitlist: bool,
    ) -> RegistrationResult<Event> {
        let id = EventId::new(normalize_identifier(id, "event id")?);
        self.insert(id, name, capacity, has_waitlist).await
    }

    /// Create an event under a freshly generated id
    pub async fn create_with_generated_id(
        &self,
        name: &str,
        capacity: i64,
        has_waitlist: bool,
    ) -> RegistrationResult<Event> {
        self.insert(EventId::generate(), name, capacity, has_waitlist)
            .await
    }

    async fn insert(
        &self,
        id: EventId,
        name: &str,
        capacity: i64,
        has_waitlist: bool,
    ) -> RegistrationResult<Event> {
        let name = normalize_name(name, self.config.max_name_length)?;
        let capacity = validate_capacity(capacity, self.config.max_capacity)?;

        let event = Event {
            id,
            name,
            capacity,
            has_waitlist,
            created_at: Utc::now(),
        };

        match self.repository.insert(event.clone()).await? {
            InsertOutcome::Inserted => {
                info!(
                    event_id = %event.id,
                    capacity = %event.capacity,
                    has_waitlist = event.has_waitlist,
                    "Created event"
                );
                Ok(event)
            }
            InsertOutcome::Duplicate => {
                warn!(event_id = %event.id, "Rejected duplicate event");
                Err(RegistrationError::DuplicateEvent(event.id))
            }
        }
    }

    /// Look up an event; absence is not an error
    pub async fn get(&self, id: &EventId) -> RegistrationResult<Option<Event>> {
        let event = self.repository.get(id).await?;
        debug!(event_id = %id, found = event.is_some(), "Looked up event");
        Ok(event)
    }

    /// Up to `limit` events in creation order
    ///
    /// # Errors
    /// - `InvalidInput` if `limit` is zero or above the configured maximum
    pub async fn list(&self, limit: usize) -> RegistrationResult<Vec<Event>> {
        let limit = validate_list_limit(limit, self.config.max_list_limit)?;
        Ok(self.repository.list(limit).await?)
    }

    /// Events in creation order, using the configured default page size
    pub async fn list_default(&self) -> RegistrationResult<Vec<Event>> {
        self.list(self.config.default_list_limit).await
    }

    /// Check the backing repository
    pub async fn ping(&self) -> InfrastructureResult<()> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> EventRegistry {
        EventRegistry::in_memory(Arc::new(EngineConfig::default()))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let events = registry();
        let created = events.create("e1", "RustConf", 2, true).await.unwrap();
        assert_eq!(created.capacity.get(), 2);
        assert!(created.has_waitlist);

        let found = events.get(&EventId::from("e1")).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_invalid_capacity() {
        let events = registry();
        for capacity in [0, -1, 100_001] {
            assert_eq!(
                events.create("e1", "RustConf", capacity, false).await,
                Err(RegistrationError::InvalidCapacity(capacity))
            );
        }
        assert!(events.get(&EventId::from("e1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_rejected() {
        let events = registry();
        events.create("e1", "RustConf", 2, true).await.unwrap();

        assert_eq!(
            events.create("e1", "Other", 5, false).await,
            Err(RegistrationError::DuplicateEvent(EventId::from("e1")))
        );
    }

    #[tokio::test]
    async fn test_generated_id() {
        let events = registry();
        let a = events
            .create_with_generated_id("Meetup", 10, false)
            .await
            .unwrap();
        let b = events
            .create_with_generated_id("Meetup", 10, false)
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(events.list(10).await.unwrap(), vec![a, b]);
    }
}
