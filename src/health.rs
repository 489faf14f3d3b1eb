// Copyright (c) 2025 - Cowboy AI, Inc.
//! Health reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::InfrastructureResult;

/// Overall status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every component answered its probe
    Healthy,
    /// At least one component failed its probe
    Degraded,
}

/// Result of probing one storage collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Whether the probe succeeded
    pub healthy: bool,
    /// Failure description when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ComponentHealth {
    /// Interpret a probe result
    pub fn from_probe(probe: InfrastructureResult<()>) -> Self {
        match probe {
            Ok(()) => Self {
                healthy: true,
                detail: None,
            },
            Err(err) => {
                tracing::error!("Health probe failed: {}", err);
                Self {
                    healthy: false,
                    detail: Some(err.to_string()),
                }
            }
        }
    }
}

/// Snapshot of engine health
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Healthy only if every component is
    pub status: HealthStatus,
    /// User storage probe
    pub users: ComponentHealth,
    /// Event storage probe
    pub events: ComponentHealth,
    /// Events that have seen registration activity
    pub active_events: usize,
    /// When the probes ran
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    /// Combine component probes into a report
    pub fn new(
        users: ComponentHealth,
        events: ComponentHealth,
        active_events: usize,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let status = if users.healthy && events.healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };
        Self {
            status,
            users,
            events,
            active_events,
            timestamp,
        }
    }

    /// Whether every component is healthy
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
