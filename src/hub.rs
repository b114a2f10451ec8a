//! Real-time alert fan-out.
//!
//! One `AlertHub` instance is owned by the service process and injected where
//! needed; it is never global state. The registry mutex is held only to
//! mutate or snapshot the subscriber map, never across a send.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use futures::future;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::models::alert::Alert;
use crate::models::barrier::Barrier;

/// An event pushed to every live subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertEvent {
    /// An explicitly created alert, broadcast verbatim.
    Alert {
        alert_type: String,
        message: String,
        latitude: f64,
        longitude: f64,
        severity: String,
    },
    /// Transient event auto-generated from a high-severity barrier report,
    /// independent of the persisted alert records.
    NewBarrier {
        barrier_type: String,
        latitude: f64,
        longitude: f64,
        severity: String,
    },
}

impl AlertEvent {
    pub fn from_alert(alert: &Alert) -> Self {
        AlertEvent::Alert {
            alert_type: alert.alert_type.clone(),
            message: alert.message.clone(),
            latitude: alert.latitude,
            longitude: alert.longitude,
            severity: alert.severity.clone(),
        }
    }

    pub fn from_barrier(barrier: &Barrier) -> Self {
        AlertEvent::NewBarrier {
            barrier_type: barrier.barrier_type.clone(),
            latitude: barrier.latitude,
            longitude: barrier.longitude,
            severity: barrier.severity.clone(),
        }
    }
}

/// Handle returned to a subscriber. Dropping the receiver (or the transport
/// behind it) makes the next broadcast evict the entry.
pub struct Subscription {
    pub id: u64,
    pub events: mpsc::Receiver<AlertEvent>,
}

pub struct AlertHub {
    subscribers: Mutex<HashMap<u64, mpsc::Sender<AlertEvent>>>,
    next_id: AtomicU64,
    channel_capacity: usize,
    send_timeout: Duration,
}

impl AlertHub {
    pub fn new(channel_capacity: usize, send_timeout: Duration) -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            channel_capacity,
            send_timeout,
        }
    }

    /// Registers a new live connection. No subscriber-count limit is
    /// enforced.
    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        self.subscribers
            .lock()
            .expect("subscriber registry poisoned")
            .insert(id, tx);
        debug!("Subscriber {} connected", id);
        Subscription { id, events: rx }
    }

    /// Removes a connection. Idempotent: removing an absent id is a no-op.
    pub fn unsubscribe(&self, id: u64) {
        let removed = self
            .subscribers
            .lock()
            .expect("subscriber registry poisoned")
            .remove(&id)
            .is_some();
        if removed {
            debug!("Subscriber {} disconnected", id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("subscriber registry poisoned")
            .len()
    }

    /// Delivers `event` to every subscriber registered at the moment of the
    /// call. Deliveries run concurrently with a bounded timeout, so one slow
    /// or full subscriber cannot stall the rest. Subscribers whose send fails
    /// or times out are removed from the registry before this returns; the
    /// failure never reaches the publisher. Returns the delivered count.
    pub async fn broadcast(&self, event: AlertEvent) -> usize {
        let snapshot: Vec<(u64, mpsc::Sender<AlertEvent>)> = {
            let subscribers = self
                .subscribers
                .lock()
                .expect("subscriber registry poisoned");
            subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        if snapshot.is_empty() {
            return 0;
        }

        let send_timeout = self.send_timeout;
        let attempts = snapshot.into_iter().map(|(id, tx)| {
            let event = event.clone();
            async move {
                match tokio::time::timeout(send_timeout, tx.send(event)).await {
                    Ok(Ok(())) => (id, true),
                    _ => (id, false),
                }
            }
        });

        let results = future::join_all(attempts).await;
        let mut delivered = 0;
        let failed: Vec<u64> = results
            .into_iter()
            .filter_map(|(id, ok)| {
                if ok {
                    delivered += 1;
                    None
                } else {
                    Some(id)
                }
            })
            .collect();

        if !failed.is_empty() {
            let mut subscribers = self
                .subscribers
                .lock()
                .expect("subscriber registry poisoned");
            for id in failed {
                warn!("Dropping unresponsive subscriber {}", id);
                subscribers.remove(&id);
            }
        }

        delivered
    }
}
