//! Process-wide message bus
//!
//! Lets one screen react when another saves an entity. Every subscription is
//! an owned [`Subscription`] handle; delivery stops when the handle is dropped.

use crate::consts::dashboard_consts::BUS_CAPACITY;
use crate::models::Account;
use log::{debug, warn};
use std::ops::ControlFlow;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum BusMessage {
    /// An account was created or updated.
    AccountSaved(Account),
}

/// Cloneable broadcast bus; clones publish to the same subscribers.
#[derive(Debug, Clone)]
pub struct MessageBus {
    sender: broadcast::Sender<BusMessage>,
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new(BUS_CAPACITY)
    }
}

impl MessageBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a message, returning how many subscribers will see it.
    pub fn publish(&self, message: BusMessage) -> usize {
        self.sender.send(message).unwrap_or(0)
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Deliver every message published from now on to `handler` until it
    /// breaks, the bus is dropped, or the returned handle is released.
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe<F>(&self, mut handler: F) -> Subscription
    where
        F: FnMut(BusMessage) -> ControlFlow<()> + Send + 'static,
    {
        let mut receiver = self.sender.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(message) => {
                        if handler(message).is_break() {
                            debug!("Bus subscriber stopped by handler");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Bus subscriber lagged, {} messages dropped", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Subscription { handle }
    }
}

/// Owned registration on the [`MessageBus`].
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Stop delivery now.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Whether messages are still being delivered.
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn saved(id: &str) -> BusMessage {
        BusMessage::AccountSaved(Account::lead(id, format!("{} Co", id)))
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_not_an_error() {
        let bus = MessageBus::default();
        assert_eq!(bus.publish(saved("1")), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_messages() {
        let bus = MessageBus::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _subscription = bus.subscribe(move |message| {
            let _ = tx.send(message);
            ControlFlow::Continue(())
        });

        assert_eq!(bus.publish(saved("1")), 1);
        let received = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        assert_eq!(received, Some(saved("1")));
    }

    #[tokio::test]
    async fn test_dropping_subscription_stops_delivery() {
        let bus = MessageBus::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscription = bus.subscribe(move |message| {
            let _ = tx.send(message);
            ControlFlow::Continue(())
        });
        subscription.unsubscribe();

        // Aborted task drops its receiver and the handler's sender.
        let closed = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        assert_eq!(closed, None);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(saved("2")), 0);
    }

    #[tokio::test]
    async fn test_handler_break_ends_subscription() {
        let bus = MessageBus::default();
        let subscription = bus.subscribe(|_| ControlFlow::Break(()));
        bus.publish(saved("1"));

        timeout(Duration::from_secs(1), async {
            while subscription.is_active() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }
}
