// Copyright (c) 2025 - Cowboy AI, Inc.
//! Engine configuration

use std::str::FromStr;

use crate::errors::{InfrastructureError, InfrastructureResult};

/// Limits and sizing shared by the registries and the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest capacity an event may be created with
    pub max_capacity: u32,
    /// Longest accepted user or event name, in characters
    pub max_name_length: usize,
    /// Page size used when a listing omits its limit
    pub default_list_limit: usize,
    /// Largest page a listing may request
    pub max_list_limit: usize,
    /// Buffered messages per registration feed subscriber
    pub feed_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
            max_name_length: 200,
            default_list_limit: 100,
            max_list_limit: 1000,
            feed_capacity: 1024,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to [`EngineConfig::default`].
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `REGISTRATION_MAX_CAPACITY` | `max_capacity` |
    /// | `REGISTRATION_MAX_NAME_LENGTH` | `max_name_length` |
    /// | `REGISTRATION_DEFAULT_LIST_LIMIT` | `default_list_limit` |
    /// | `REGISTRATION_MAX_LIST_LIMIT` | `max_list_limit` |
    /// | `REGISTRATION_FEED_CAPACITY` | `feed_capacity` |
    pub fn from_env() -> InfrastructureResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> InfrastructureResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            max_capacity: parse_var(&lookup, "REGISTRATION_MAX_CAPACITY", defaults.max_capacity)?,
            max_name_length: parse_var(
                &lookup,
                "REGISTRATION_MAX_NAME_LENGTH",
                defaults.max_name_length,
            )?,
            default_list_limit: parse_var(
                &lookup,
                "REGISTRATION_DEFAULT_LIST_LIMIT",
                defaults.default_list_limit,
            )?,
            max_list_limit: parse_var(
                &lookup,
                "REGISTRATION_MAX_LIST_LIMIT",
                defaults.max_list_limit,
            )?,
            feed_capacity: parse_var(&lookup, "REGISTRATION_FEED_CAPACITY", defaults.feed_capacity)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable together
    pub fn validate(&self) -> InfrastructureResult<()> {
        if self.max_capacity == 0 {
            return Err(InfrastructureError::Configuration(
                "max_capacity must be greater than zero".to_string(),
            ));
        }
        if self.max_name_length == 0 {
            return Err(InfrastructureError::Configuration(
                "max_name_length must be greater than zero".to_string(),
            ));
        }
        if self.default_list_limit == 0 || self.default_list_limit > self.max_list_limit {
            return Err(InfrastructureError::Configuration(format!(
                "default_list_limit {} must be within 1..={}",
                self.default_list_limit, self.max_list_limit
            )));
        }
        // broadcast::channel panics on zero
        if self.feed_capacity == 0 {
            return Err(InfrastructureError::Configuration(
                "feed_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> InfrastructureResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            InfrastructureError::Configuration(format!("{key}={raw:?} is invalid: {e}"))
        }),
        None => Ok(default),
    }
}
