//! # Application Events
//!
//! Notifications published by the store after its state changes. Delivery is
//! best-effort: the state is the source of truth, events only say "look again".
//!
//! Every subscriber owns a bounded channel and receives every event published
//! after it subscribed. A subscriber that falls `capacity` events behind misses
//! newer ones until it drains its queue.

use async_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::app::state::SessionPhase;

/// State change notifications
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Initial load of the public collections finished
    Ready,
    /// Session moved to a new phase
    SessionChanged(SessionPhase),
    /// Pools replaced (new count)
    PoolsUpdated(usize),
    /// Proposals replaced (new count)
    ProposalsUpdated(usize),
    /// Strategies replaced (new count)
    StrategiesUpdated(usize),
    /// Positions replaced (new count)
    PositionsUpdated(usize),
    /// Balance re-fetched (native units)
    BalanceUpdated(f64),
    /// Loading flag flipped
    Loading(bool),
    /// An action failed; `message` is the text stored as the current error
    ActionFailed { action: String, message: String },
}

/// Fan-out of store events, one bounded channel per subscriber.
#[derive(Clone)]
pub(crate) struct EventBus {
    capacity: usize,
    /// `None` once closed
    subscribers: Arc<Mutex<Option<Vec<Sender<AppEvent>>>>>,
}

impl EventBus {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            subscribers: Arc::new(Mutex::new(Some(Vec::new()))),
        }
    }

    /// Publish without waiting. A full subscriber misses the event; a dropped
    /// one is forgotten.
    pub(crate) fn emit(&self, event: AppEvent) {
        let mut subscribers = self.subscribers.lock();
        let Some(senders) = subscribers.as_mut() else {
            return;
        };
        senders.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::debug!(?event, "Subscriber queue full, dropping event");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        });
    }

    /// New receiver for events published from now on. Closed immediately if
    /// the bus is already closed.
    pub(crate) fn subscribe(&self) -> Receiver<AppEvent> {
        let (tx, rx) = bounded(self.capacity);
        match self.subscribers.lock().as_mut() {
            Some(senders) => senders.push(tx),
            None => {
                tx.close();
            }
        }
        rx
    }

    pub(crate) fn close(&self) {
        if let Some(senders) = self.subscribers.lock().take() {
            for tx in senders {
                tx.close();
            }
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.lock().as_ref().map_or(0, Vec::len)
    }
}
