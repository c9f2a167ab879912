//! State-change events
//!
//! Actions publish what they changed; list views subscribe and refresh
//! themselves. Publishers never need to know which views exist.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// A customer was created, updated or deleted
    CustomersChanged,

    /// A rental was created or changed status
    RentalsChanged,
}

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StateChange>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        EventBus { sender }
    }

    /// Publishes `change` to every current subscriber
    ///
    /// Publishing with nobody listening is not an error.
    pub fn publish(&self, change: StateChange) {
        match self.sender.send(change) {
            Ok(receivers) => tracing::debug!("{:?} delivered to {} view(s)", change, receivers),
            Err(_) => tracing::debug!("{:?} published with no subscribers", change),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.sender.subscribe()
    }
}
