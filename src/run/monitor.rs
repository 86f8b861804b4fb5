// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Event subscription and the run monitor.
//!
//! [`EventBus`] is the in-process face of the backend push stream: handlers
//! subscribe by event-type name and receive envelopes over an unbounded
//! channel, one channel per subscription so arrival order is preserved
//! across every type the subscriber asked for. Dropping a [`Subscription`]
//! deregisters it; nothing is delivered after teardown.
//!
//! [`RunMonitor`] ties a subscription to a [`RunState`] and processes events
//! strictly one at a time on whatever task polls it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::mpsc;
use tracing::trace;

use super::decode::{decode, EventEnvelope};
use super::reducer::RunState;
use super::types::RUN_EVENT_TYPES;

type Registry = HashMap<String, Vec<(u64, mpsc::UnboundedSender<EventEnvelope>)>>;

#[derive(Debug, Default)]
struct BusInner {
    next_id: u64,
    handlers: Registry,
}

/// In-process event fan-out keyed by event-type name.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the given event types on a single ordered channel.
    pub fn subscribe<I, S>(&self, event_types: I) -> Subscription
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;

        let event_types: Vec<String> = event_types.into_iter().map(Into::into).collect();
        for event_type in &event_types {
            inner
                .handlers
                .entry(event_type.clone())
                .or_default()
                .push((id, tx.clone()));
        }

        Subscription {
            bus: Arc::downgrade(&self.inner),
            id,
            event_types,
            rx,
        }
    }

    /// Deliver an envelope to every live subscriber of its event type.
    ///
    /// Returns the number of subscribers it reached. Subscribers whose
    /// receiving end has gone away are pruned on the spot.
    pub fn publish(&self, envelope: EventEnvelope) -> usize {
        let mut inner = lock(&self.inner);
        let Some(handlers) = inner.handlers.get_mut(&envelope.event_type) else {
            return 0;
        };

        let mut delivered = 0;
        handlers.retain(|(_, tx)| match tx.send(envelope.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => false,
        });
        trace!(event_type = %envelope.event_type, delivered, "published event");
        delivered
    }

    /// Number of live subscriptions registered for an event type.
    pub fn subscriber_count(&self, event_type: &str) -> usize {
        lock(&self.inner)
            .handlers
            .get(event_type)
            .map_or(0, Vec::len)
    }
}

/// A live registration on the bus. Dropping it deregisters every handler.
#[derive(Debug)]
pub struct Subscription {
    bus: Weak<Mutex<BusInner>>,
    id: u64,
    event_types: Vec<String>,
    rx: mpsc::UnboundedReceiver<EventEnvelope>,
}

impl Subscription {
    /// Wait for the next envelope. Returns `None` once the bus is gone.
    pub async fn next(&mut self) -> Option<EventEnvelope> {
        self.rx.recv().await
    }

    /// Take the next already-delivered envelope without waiting.
    pub fn try_next(&mut self) -> Option<EventEnvelope> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(bus) = self.bus.upgrade() else {
            return;
        };
        let mut inner = lock(&bus);
        for event_type in &self.event_types {
            if let Some(handlers) = inner.handlers.get_mut(event_type) {
                handlers.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

/// Lock the registry, recovering from poisoning.
fn lock(inner: &Mutex<BusInner>) -> std::sync::MutexGuard<'_, BusInner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Watches one run: a subscription to all run event types plus the reduced
/// state. Dropping the monitor tears the subscription down.
#[derive(Debug)]
pub struct RunMonitor {
    state: RunState,
    subscription: Subscription,
}

impl RunMonitor {
    /// Subscribe to run telemetry on the bus, scoped to the given run id.
    pub fn attach(bus: &EventBus, scope: impl Into<String>) -> Self {
        Self {
            state: RunState::new(scope),
            subscription: bus.subscribe(RUN_EVENT_TYPES),
        }
    }

    /// The current reduced state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Lower the state's re-fetch signal.
    pub fn acknowledge_refetch(&mut self) {
        self.state.acknowledge_refetch();
    }

    /// Wait for and process the next event.
    ///
    /// Returns `false` once the bus has shut down; malformed envelopes are
    /// dropped by the decoder and still count as processed.
    pub async fn next_event(&mut self) -> bool {
        match self.subscription.next().await {
            Some(envelope) => {
                if let Some(event) = decode(&envelope) {
                    self.state.apply(&event);
                }
                true
            }
            None => false,
        }
    }

    /// Process everything already delivered, without waiting.
    ///
    /// Returns the number of envelopes consumed.
    pub fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Some(envelope) = self.subscription.try_next() {
            if let Some(event) = decode(&envelope) {
                self.state.apply(&event);
            }
            processed += 1;
        }
        processed
    }
}
