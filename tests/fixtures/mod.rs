// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for event-registration
//!
//! Builds engines seeded with deterministic users and events so every
//! test starts from a known roster.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use event_registration::domain::{EventId, User, UserId};
use event_registration::store::{
    EventRepository, InMemoryEventRepository, InMemoryUserRepository, InsertOutcome,
    UserRepository,
};
use event_registration::{
    EngineConfig, EventRegistry, InfrastructureError, InfrastructureResult, RegistrationEngine,
    UserRegistry,
};

/// Engine with the given users and one event `E1`
pub async fn engine_with_event(
    capacity: i64,
    has_waitlist: bool,
    user_ids: &[&str],
) -> RegistrationEngine {
    let engine = RegistrationEngine::in_memory(EngineConfig::default());
    engine
        .events()
        .create("E1", "Systems Meetup", capacity, has_waitlist)
        .await
        .expect("Invalid event fixture");
    seed_users(&engine, user_ids).await;
    engine
}

/// Create users named after their ids
pub async fn seed_users(engine: &RegistrationEngine, user_ids: &[&str]) {
    for id in user_ids {
        engine
            .users()
            .create(id, &format!("User {id}"))
            .await
            .expect("Invalid user fixture");
    }
}

/// `count` user ids of the form `user-000`
pub fn numbered_users(count: usize) -> Vec<String> {
    (0..count).map(|n| format!("user-{n:03}")).collect()
}

pub fn user(id: &str) -> UserId {
    UserId::from(id)
}

pub fn e1() -> EventId {
    EventId::from("E1")
}

/// User repository whose backing store can be switched off
#[derive(Default)]
pub struct FlakyUserRepository {
    inner: InMemoryUserRepository,
    offline: AtomicBool,
}

impl FlakyUserRepository {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> InfrastructureResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Unavailable("users table offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FlakyUserRepository {
    async fn insert(&self, user: User) -> InfrastructureResult<InsertOutcome> {
        self.check()?;
        self.inner.insert(user).await
    }

    async fn get(&self, id: &UserId) -> InfrastructureResult<Option<User>> {
        self.check()?;
        self.inner.get(id).await
    }

    async fn list(&self, limit: usize) -> InfrastructureResult<Vec<User>> {
        self.check()?;
        self.inner.list(limit).await
    }

    async fn ping(&self) -> InfrastructureResult<()> {
        self.check()
    }
}

/// Engine whose user storage can fail on demand
pub fn engine_with_flaky_users() -> (RegistrationEngine, Arc<FlakyUserRepository>) {
    let config = Arc::new(EngineConfig::default());
    let flaky = Arc::new(FlakyUserRepository::default());

    let users = Arc::new(UserRegistry::new(
        Arc::clone(&flaky) as Arc<dyn UserRepository>,
        Arc::clone(&config),
    ));
    let events = Arc::new(EventRegistry::new(
        Arc::new(InMemoryEventRepository::new()) as Arc<dyn EventRepository>,
        Arc::clone(&config),
    ));

    (RegistrationEngine::new(users, events, &config), flaky)
}
