use serde::Serialize;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::push::protocol::{Collection, PushMessage};

/// A handle to send push messages to one connected WebSocket client.
#[derive(Debug, Clone)]
pub struct SubscriberHandle {
    pub id: Uuid,
    pub sender: mpsc::UnboundedSender<PushMessage>,
}

/// Fanout for full-collection snapshots: one producer (the domain service),
/// N subscribers (connected clients).
///
/// Fire-and-forget: no acknowledgment, no backpressure, no replay for late
/// subscribers. Same-collection messages reach a given subscriber in publish
/// order because each subscriber has a single ordered channel.
pub struct UpdateHub {
    subscribers: RwLock<Vec<SubscriberHandle>>,
}

impl UpdateHub {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Register a new WebSocket connection. Returns the subscriber id and
    /// the receiver the session task should drain.
    pub async fn subscribe(&self) -> (Uuid, mpsc::UnboundedReceiver<PushMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.subscribers
            .write()
            .await
            .push(SubscriberHandle { id, sender: tx });
        (id, rx)
    }

    /// Remove a connection after its session ends.
    pub async fn unsubscribe(&self, id: Uuid) {
        self.subscribers.write().await.retain(|s| s.id != id);
    }

    /// Publish a message to every subscriber, the originator included.
    pub async fn publish(&self, message: PushMessage) {
        let subscribers = self.subscribers.read().await;
        for subscriber in subscribers.iter() {
            // A failed send means the receiver is gone; the session task
            // unsubscribes it on exit.
            let _ = subscriber.sender.send(message.clone());
        }
    }

    /// Encode a full collection snapshot and publish it. A snapshot that
    /// fails to encode is logged and dropped; the write it followed stands.
    pub async fn broadcast<T: Serialize>(&self, collection: Collection, snapshot: &T) {
        match PushMessage::snapshot(collection, snapshot) {
            Ok(message) => self.publish(message).await,
            Err(e) => {
                tracing::error!("failed to encode {} snapshot: {e}", collection.as_str());
            }
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

impl Default for UpdateHub {
    fn default() -> Self {
        Self::new()
    }
}
