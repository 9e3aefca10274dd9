//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use nook_domain::error::NookError;
use nook_domain::event::Event;

use crate::ports::EventPublisher;

/// In-process event bus over a tokio [`broadcast`] channel.
///
/// Cheap to clone — every clone publishes into the same channel.
/// Publishing with zero subscribers succeeds and drops the event.
#[derive(Debug, Clone)]
pub struct LocalEventBus {
    sender: broadcast::Sender<Event>,
}

impl LocalEventBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventPublisher for LocalEventBus {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), NookError>> + Send {
        // send only fails with zero receivers; that is not an error here.
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}
