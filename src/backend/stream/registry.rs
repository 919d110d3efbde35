/**
 * Conversation Subscriber Registry
 *
 * This module maintains the live set of streaming subscribers per
 * conversation and delivers published envelopes to all of them.
 *
 * # Architecture
 *
 * The registry is a single owned service object (`StreamRegistry`),
 * constructed once at startup and injected into request handlers through
 * `AppState`. It maps a conversation id to an ordered collection of
 * subscriber handles, each holding the writer end of an open SSE
 * connection.
 *
 * # Thread Safety
 *
 * Handlers run on a multi-threaded runtime, so the map of collections is
 * guarded by a mutex. Every registry operation (subscribe, remove,
 * publish) takes the lock once and never awaits while holding it, so each
 * operation is atomic with respect to the others.
 *
 * # Subscriber Lifecycle
 *
 * A subscriber moves through exactly three states:
 *
 * - `OPEN` - registered, receiving keep-alives and published envelopes
 * - `CLOSING` - the client disconnected and cleanup is in progress
 * - `CLOSED` - removed from the registry, underlying channel released
 *
 * The `OPEN -> CLOSING` transition is triggered only by client disconnect;
 * the server never evicts a subscriber. Cleanup happens in
 * `Subscription`'s `Drop` impl, so it runs on every exit path of the
 * response stream, not only the happy path.
 *
 * # Delivery Semantics
 *
 * Fan-out is fire-and-forget. A write to a subscriber whose connection is
 * gone but not yet pruned is logged and skipped; it never fails the
 * publish nor prevents delivery to the remaining subscribers. There is no
 * acknowledgement protocol back from subscribers.
 */
use bytes::Bytes;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::Stream;

use super::frames;

/// The writer end of one open subscriber connection
///
/// The registry holds these for fan-out only; the receiving half is owned
/// exclusively by the client connection's response stream.
struct SubscriberHandle {
    /// Registry-unique id, used to locate this handle for removal
    id: u64,
    /// Writer end of the subscriber's frame channel
    tx: mpsc::UnboundedSender<Bytes>,
}

/// Shared interior of the registry
struct RegistryInner {
    /// Conversation id -> subscribers, in registration order
    subscribers: Mutex<HashMap<String, Vec<SubscriberHandle>>>,
    /// Source of registry-unique subscriber ids
    next_id: AtomicU64,
}

/// The conversation subscriber registry
///
/// Maps conversation ids to the set of currently-open streaming
/// connections. Cloning is cheap (`Arc` internally) so the registry can be
/// shared across handlers, matching how the rest of the application state
/// is distributed.
///
/// # Usage
///
/// ```rust
/// use chatstream::backend::stream::StreamRegistry;
///
/// let registry = StreamRegistry::new();
/// let subscription = registry.subscribe("u1-u2");
/// let delivered = registry.publish("u1-u2", r#"{"id":"m1"}"#);
/// assert_eq!(delivered, 1);
/// drop(subscription);
/// assert_eq!(registry.subscriber_count("u1-u2"), 0);
/// ```
#[derive(Clone)]
pub struct StreamRegistry {
    inner: Arc<RegistryInner>,
}

impl StreamRegistry {
    /// Create an empty registry
    ///
    /// Intended to be called once at process startup; the registry's
    /// lifetime is the process lifetime. There is no persistence: a
    /// restart silently drops all open subscriptions.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register a new subscriber for a conversation
    ///
    /// Creates the conversation's collection if this is its first
    /// subscriber, appends the new writer, and returns a `Subscription`
    /// that yields published frames. Dropping the `Subscription`
    /// deregisters the writer.
    ///
    /// The caller is responsible for having resolved the correct
    /// conversation id and for authorization; no validation happens here
    /// beyond what the HTTP handler already performed.
    ///
    /// # Arguments
    ///
    /// * `chat_id` - The conversation id to subscribe to
    pub fn subscribe(&self, chat_id: &str) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);

        let mut subscribers = self.inner.subscribers.lock().unwrap();
        subscribers
            .entry(chat_id.to_string())
            .or_default()
            .push(SubscriberHandle { id, tx });

        tracing::info!(
            "[Stream] Subscriber {} registered for chat {} ({} active)",
            id,
            chat_id,
            subscribers.get(chat_id).map(|s| s.len()).unwrap_or(0)
        );

        Subscription {
            rx,
            _guard: SubscriberGuard {
                registry: self.clone(),
                chat_id: chat_id.to_string(),
                id,
            },
        }
    }

    /// Fan an envelope out to every current subscriber of a conversation
    ///
    /// Encodes the envelope as a single SSE data frame and writes it to
    /// each subscriber's channel in registration order. The envelope is
    /// treated as opaque - no parsing, no validation.
    ///
    /// A failed write means the subscriber disconnected but has not been
    /// pruned yet; it is skipped and the loop continues. Publishing to a
    /// conversation with no subscribers delivers nothing and succeeds.
    ///
    /// # Arguments
    ///
    /// * `chat_id` - The target conversation id
    /// * `envelope` - The serialized message payload, forwarded verbatim
    ///
    /// # Returns
    ///
    /// The number of subscribers the frame was delivered to
    pub fn publish(&self, chat_id: &str, envelope: &str) -> usize {
        let frame = frames::data_frame(envelope);
        let subscribers = self.inner.subscribers.lock().unwrap();

        let Some(handles) = subscribers.get(chat_id) else {
            tracing::debug!("[Stream] Publish to chat {} with no subscribers", chat_id);
            return 0;
        };

        let mut delivered = 0;
        for handle in handles {
            match handle.tx.send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    // Receiver already dropped; the guard will prune it
                    tracing::debug!(
                        "[Stream] Skipping closed subscriber {} on chat {}",
                        handle.id,
                        chat_id
                    );
                }
            }
        }

        tracing::info!(
            "[Stream] Published to chat {}: {}/{} subscribers",
            chat_id,
            delivered,
            handles.len()
        );

        delivered
    }

    /// Number of registered subscribers for a conversation
    pub fn subscriber_count(&self, chat_id: &str) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap()
            .get(chat_id)
            .map(|handles| handles.len())
            .unwrap_or(0)
    }

    /// Remove one subscriber from a conversation's collection
    ///
    /// Idempotent: removing an already-removed subscriber is a no-op. The
    /// conversation key itself is dropped once its collection drains.
    fn remove(&self, chat_id: &str, id: u64) {
        let mut subscribers = self.inner.subscribers.lock().unwrap();
        if let Some(handles) = subscribers.get_mut(chat_id) {
            let before = handles.len();
            handles.retain(|handle| handle.id != id);
            if handles.len() < before {
                tracing::info!("[Stream] Subscriber {} removed from chat {}", id, chat_id);
            }
            if handles.is_empty() {
                subscribers.remove(chat_id);
            }
        }
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes a subscriber from the registry when dropped
///
/// Held by the `Subscription` so deregistration is tied to the response
/// stream's lifetime: whether the client closed cleanly, aborted, or the
/// stream was torn down for any other reason, the writer is pruned.
struct SubscriberGuard {
    registry: StreamRegistry,
    chat_id: String,
    id: u64,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.registry.remove(&self.chat_id, self.id);
    }
}

/// One subscriber's view of a conversation stream
///
/// Yields the SSE data frames published to the conversation since the
/// subscription was opened. The registry holds only the writer end; this
/// receiver is owned exclusively by the client connection using it.
///
/// Dropping the subscription deregisters the writer (scoped cleanup).
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Bytes>,
    _guard: SubscriberGuard,
}

impl Subscription {
    /// Receive the next published frame
    ///
    /// Returns `None` once the registry side is gone. Primarily useful in
    /// tests; handlers consume the subscription as a `Stream`.
    pub async fn recv(&mut self) -> Option<Bytes> {
        self.rx.recv().await
    }
}

impl Stream for Subscription {
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Bytes>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let registry = StreamRegistry::new();
        let mut first = registry.subscribe("u1-u2");
        let mut second = registry.subscribe("u1-u2");

        let delivered = registry.publish("u1-u2", r#"{"id":"m1","message":"hi"}"#);
        assert_eq!(delivered, 2);

        let frame = first.recv().await.unwrap();
        assert_eq!(&frame[..], b"data: {\"id\":\"m1\",\"message\":\"hi\"}\n\n" as &[u8]);
        let frame = second.recv().await.unwrap();
        assert_eq!(&frame[..], b"data: {\"id\":\"m1\",\"message\":\"hi\"}\n\n" as &[u8]);
    }

    #[tokio::test]
    async fn test_publish_does_not_cross_conversations() {
        let registry = StreamRegistry::new();
        let mut target = registry.subscribe("u1-u2");
        let mut other = registry.subscribe("u1-u3");

        registry.publish("u1-u2", "hello");

        assert!(target.recv().await.is_some());
        let nothing = timeout(Duration::from_millis(50), other.recv()).await;
        assert!(nothing.is_err(), "subscriber of another chat received a frame");
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers_succeeds() {
        let registry = StreamRegistry::new();
        assert_eq!(registry.publish("empty-chat", "hello"), 0);
    }

    #[tokio::test]
    async fn test_drop_deregisters_subscriber() {
        let registry = StreamRegistry::new();
        let subscription = registry.subscribe("u1-u2");
        assert_eq!(registry.subscriber_count("u1-u2"), 1);

        drop(subscription);
        assert_eq!(registry.subscriber_count("u1-u2"), 0);

        // A later publish sees no subscribers at all
        assert_eq!(registry.publish("u1-u2", "hello"), 0);
    }

    #[tokio::test]
    async fn test_remaining_subscriber_still_served_after_one_drops() {
        let registry = StreamRegistry::new();
        let first = registry.subscribe("u1-u2");
        let mut second = registry.subscribe("u1-u2");

        drop(first);

        let delivered = registry.publish("u1-u2", "still here");
        assert_eq!(delivered, 1);
        assert!(second.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_subscriber_count_per_conversation() {
        let registry = StreamRegistry::new();
        let _a = registry.subscribe("u1-u2");
        let _b = registry.subscribe("u1-u2");
        let _c = registry.subscribe("g1");

        assert_eq!(registry.subscriber_count("u1-u2"), 2);
        assert_eq!(registry.subscriber_count("g1"), 1);
        assert_eq!(registry.subscriber_count("missing"), 0);
    }

    #[tokio::test]
    async fn test_removal_is_idempotent() {
        let registry = StreamRegistry::new();
        let subscription = registry.subscribe("u1-u2");

        registry.remove("u1-u2", 0);
        assert_eq!(registry.subscriber_count("u1-u2"), 0);

        // Guard drop removes the same id again; must not panic or resurrect
        drop(subscription);
        assert_eq!(registry.subscriber_count("u1-u2"), 0);
    }

    #[tokio::test]
    async fn test_frames_arrive_in_publish_order() {
        let registry = StreamRegistry::new();
        let mut subscription = registry.subscribe("u1-u2");

        registry.publish("u1-u2", "one");
        registry.publish("u1-u2", "two");

        assert_eq!(&subscription.recv().await.unwrap()[..], b"data: one\n\n" as &[u8]);
        assert_eq!(&subscription.recv().await.unwrap()[..], b"data: two\n\n" as &[u8]);
    }
}
