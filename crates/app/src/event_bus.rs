//! Fan-out of [`HomeEvent`]s to live listeners (the SSE stream, tests).

use std::future::Future;

use tokio::sync::broadcast::{self, Receiver, Sender};

use homecontrol_domain::error::HomeControlError;
use homecontrol_domain::event::HomeEvent;

use crate::ports::EventPublisher;

/// Broadcast hub for home events.
///
/// Listeners only see what is published after they subscribed. A listener
/// that falls more than `capacity` events behind loses the oldest ones.
/// With nobody listening, events are dropped and publishing still succeeds.
pub struct InProcessEventBus {
    tx: Sender<HomeEvent>,
}

impl InProcessEventBus {
    /// A bus buffering at most `capacity` events per listener.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity).0,
        }
    }

    /// Register a new listener.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<HomeEvent> {
        self.tx.subscribe()
    }

    /// Listeners currently attached.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(
        &self,
        event: HomeEvent,
    ) -> impl Future<Output = Result<(), HomeControlError>> + Send {
        if self.tx.send(event).is_err() {
            tracing::trace!("home event dropped, no listener");
        }
        std::future::ready(Ok(()))
    }
}
