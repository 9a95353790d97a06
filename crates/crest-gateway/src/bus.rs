//! Notification bus - ordered, isolated fan-out to subscribers
//!
//! Subscribers register per event kind and are invoked in registration
//! order. Each invocation runs on its own task so a panicking subscriber
//! cannot take down its siblings or the dispatch path, but the bus awaits
//! every subscriber before returning: a stalled subscriber stalls
//! ingestion. Callers wanting to decouple the two must offload dispatch to
//! a separate task themselves.

use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;

use crate::events::{EventKind, GatewayEvent};

/// Future returned by a subscriber invocation
pub type SubscriberFuture = BoxFuture<'static, anyhow::Result<()>>;

type Subscriber = dyn Fn(Arc<GatewayEvent>) -> SubscriberFuture + Send + Sync;

/// Per-kind registry of asynchronous subscribers
#[derive(Default)]
pub struct NotificationBus {
    subscribers: DashMap<EventKind, Vec<Arc<Subscriber>>>,
}

impl NotificationBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for one event kind
    ///
    /// Subscribers for the same kind run in the order they were registered.
    pub fn subscribe<F>(&self, kind: EventKind, subscriber: F)
    where
        F: Fn(Arc<GatewayEvent>) -> SubscriberFuture + Send + Sync + 'static,
    {
        self.subscribers
            .entry(kind)
            .or_default()
            .push(Arc::new(subscriber));
    }

    /// Number of subscribers registered for a kind
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, |s| s.len())
    }

    /// Deliver one notification to every subscriber of its kind
    ///
    /// Suspends until all subscribers complete. A subscriber error or panic
    /// is logged and never propagated; mutations committed before the fault
    /// stay committed.
    pub async fn dispatch(&self, event: GatewayEvent) {
        let kind = event.kind();
        let registered: Vec<Arc<Subscriber>> = self
            .subscribers
            .get(&kind)
            .map(|s| s.value().clone())
            .unwrap_or_default();
        if registered.is_empty() {
            return;
        }

        let event = Arc::new(event);
        for (position, subscriber) in registered.into_iter().enumerate() {
            let invocation = tokio::spawn(subscriber(event.clone()));
            match invocation.await {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    tracing::error!(?kind, position, %error, "subscriber returned an error");
                }
                Err(join_error) if join_error.is_panic() => {
                    tracing::error!(?kind, position, "subscriber panicked");
                }
                Err(_) => {
                    tracing::warn!(?kind, position, "subscriber task was cancelled");
                }
            }
        }
    }

    /// Drop every registration (engine disposal)
    pub fn clear(&self) {
        self.subscribers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn resumed() -> GatewayEvent {
        GatewayEvent::Resumed
    }

    #[tokio::test]
    async fn test_subscribers_run_in_registration_order() {
        let bus = NotificationBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in 0..3 {
            let order = order.clone();
            bus.subscribe(EventKind::Resumed, move |_| {
                let order = order.clone();
                Box::pin(async move {
                    order.lock().push(tag);
                    Ok(())
                })
            });
        }

        bus.dispatch(resumed()).await;
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_fault_does_not_block_siblings() {
        let bus = NotificationBus::new();
        let reached = Arc::new(Mutex::new(Vec::new()));

        bus.subscribe(EventKind::Resumed, |_| {
            Box::pin(async { panic!("subscriber bug") })
        });
        bus.subscribe(EventKind::Resumed, |_| {
            Box::pin(async { anyhow::bail!("subscriber error") })
        });
        let witness = reached.clone();
        bus.subscribe(EventKind::Resumed, move |_| {
            let witness = witness.clone();
            Box::pin(async move {
                witness.lock().push("ran");
                Ok(())
            })
        });

        bus.dispatch(resumed()).await;
        assert_eq!(*reached.lock(), vec!["ran"]);
    }

    #[tokio::test]
    async fn test_dispatch_is_scoped_to_the_event_kind() {
        let bus = NotificationBus::new();
        let hits = Arc::new(Mutex::new(0u32));

        let counter = hits.clone();
        bus.subscribe(EventKind::Ready, move |_| {
            let counter = counter.clone();
            Box::pin(async move {
                *counter.lock() += 1;
                Ok(())
            })
        });

        bus.dispatch(resumed()).await;
        assert_eq!(*hits.lock(), 0);
        assert_eq!(bus.subscriber_count(EventKind::Ready), 1);
    }
}
