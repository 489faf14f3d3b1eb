// Copyright (c) 2025 - Cowboy AI, Inc.
//! Registration Demo
//!
//! Drives an in-memory engine through a waitlist promotion and a
//! last-seat race, then prints the resulting rosters as JSON.
//!
//! Run with: cargo run --bin registration-demo
//!
//! Configuration comes from `REGISTRATION_*` environment variables (see
//! `EngineConfig::from_env`). Set `RUST_LOG=debug` for lookup traces.

use anyhow::{Context, Result};
use event_registration::domain::{EventId, UserId};
use event_registration::{EngineConfig, RegistrationEngine, RegistrationEvent};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

const CONTENDERS: usize = 16;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting registration demo");

    let config = EngineConfig::from_env().context("Failed to load engine configuration")?;
    info!(?config, "Configuration loaded");

    let engine = Arc::new(RegistrationEngine::in_memory(config));
    let feed = tokio::spawn(log_feed(engine.subscribe()));

    waitlist_promotion(&engine).await?;
    last_seat_race(&engine).await?;

    let report = engine.health().await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    drop(engine);
    feed.await.context("Feed logger panicked")?;

    info!("Demo complete");
    Ok(())
}

/// Capacity 2 with waitlist: u3 waits, then takes u1's seat
async fn waitlist_promotion(engine: &RegistrationEngine) -> Result<()> {
    for (id, name) in [("u1", "Ada"), ("u2", "Grace"), ("u3", "Barbara")] {
        engine.users().create(id, name).await?;
    }
    engine.events().create("E1", "Systems Meetup", 2, true).await?;

    let event_id = EventId::from("E1");
    let (u1, u2, u3) = (UserId::from("u1"), UserId::from("u2"), UserId::from("u3"));

    engine.register(&u1, &event_id).await?;
    engine.register(&u2, &event_id).await?;
    let status = engine.register(&u3, &event_id).await?;
    let position = engine.get_waitlist_position(&u3, &event_id).await?;
    info!(%status, ?position, "u3 queued");

    let departure = engine.unregister(&u1, &event_id).await?;
    info!(promoted = ?departure.promoted, "u1 left");

    let roster = engine.roster(&event_id).await?;
    println!("{}", serde_json::to_string_pretty(&roster)?);
    Ok(())
}

/// Many users race for a single seat on an event without waitlist
async fn last_seat_race(engine: &Arc<RegistrationEngine>) -> Result<()> {
    engine.events().create("E2", "Private Dinner", 1, false).await?;

    let mut contenders = Vec::with_capacity(CONTENDERS);
    for n in 0..CONTENDERS {
        let user = engine
            .users()
            .create(&format!("racer-{n:02}"), &format!("Racer {n}"))
            .await?;
        contenders.push(user.id);
    }

    let attempts = contenders.into_iter().map(|user_id| {
        let engine = Arc::clone(engine);
        tokio::spawn(async move { engine.register(&user_id, &EventId::from("E2")).await })
    });

    let mut admitted = 0;
    for attempt in futures::future::join_all(attempts).await {
        match attempt.context("Registration task panicked")? {
            Ok(_) => admitted += 1,
            Err(err) => warn!(error = %err, "Contender turned away"),
        }
    }
    info!(admitted, contenders = CONTENDERS, "Last-seat race finished");

    let roster = engine.roster(&EventId::from("E2")).await?;
    println!("{}", serde_json::to_string_pretty(&roster)?);
    Ok(())
}

async fn log_feed(mut feed: tokio::sync::broadcast::Receiver<RegistrationEvent>) {
    loop {
        match feed.recv().await {
            Ok(event) => info!(
                event = %event.aggregate_id,
                user = %event.user_id,
                change = ?event.change,
                "Roster changed"
            ),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Feed lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}
