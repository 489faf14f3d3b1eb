// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory repositories

use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use tokio::sync::RwLock;

use super::{EventRepository, InsertOutcome, UserRepository};
use crate::domain::{Event, EventId, User, UserId};
use crate::errors::InfrastructureResult;

/// Keyed map that remembers insertion order
#[derive(Debug)]
struct OrderedTable<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for OrderedTable<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone> OrderedTable<K, V> {
    fn insert(&mut self, key: K, value: V) -> InsertOutcome {
        if self.rows.contains_key(&key) {
            return InsertOutcome::Duplicate;
        }
        self.order.push(key.clone());
        self.rows.insert(key, value);
        InsertOutcome::Inserted
    }

    fn get(&self, key: &K) -> Option<V> {
        self.rows.get(key).cloned()
    }

    fn list(&self, limit: usize) -> Vec<V> {
        self.order
            .iter()
            .filter_map(|key| self.rows.get(key))
            .take(limit)
            .cloned()
            .collect()
    }
}

/// [`UserRepository`] held entirely in process memory
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<OrderedTable<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> InfrastructureResult<InsertOutcome> {
        let mut table = self.table.write().await;
        Ok(table.insert(user.id.clone(), user))
    }

    async fn get(&self, id: &UserId) -> InfrastructureResult<Option<User>> {
        Ok(self.table.read().await.get(id))
    }

    async fn list(&self, limit: usize) -> InfrastructureResult<Vec<User>> {
        Ok(self.table.read().await.list(limit))
    }

    async fn ping(&self) -> InfrastructureResult<()> {
        Ok(())
    }
}

/// [`EventRepository`] held entirely in process memory
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    table: RwLock<OrderedTable<EventId, Event>>,
}

impl InMemoryEventRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn insert(&self, event: Event) -> InfrastructureResult<InsertOutcome> {
        let mut table = self.table.write().await;
        Ok(table.insert(event.id.clone(), event))
    }

    async fn get(&self, id: &EventId) -> InfrastructureResult<Option<Event>> {
        Ok(self.table.read().await.get(id))
    }

    async fn list(&self, limit: usize) -> InfrastructureResult<Vec<Event>> {
        Ok(self.table.read().await.list(limit))
    }

    async fn ping(&self) -> InfrastructureResult<()> {
        Ok(())
    }
}
