use crate::subscriber::Subscriber;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// Marker trait for events that can be routed through the [`EventBus`].
///
/// Every event names the channel it belongs to; the bus delivers it only to
/// subscribers registered under that exact channel key.
pub trait Event: Send + Sync + 'static {
    /// The opaque channel key this event is addressed to.
    fn channel(&self) -> &str;
}

/// Identity used purely for set membership; never compared by value elsewhere.
type SubscriberId = u64;

type Registrations<T> = Vec<(SubscriberId, Arc<dyn Subscriber<T>>)>;
type ChannelMap<T> = FxHashMap<String, Registrations<T>>;

/// A thread-safe publish/subscribe registry keyed by channel name.
///
/// Channels are created implicitly on first subscribe and never explicitly
/// destroyed; an entry with an empty subscriber set is inert. The registry is
/// the only shared mutable state and all mutation goes through
/// [`EventBus::subscribe`], [`SubscriptionGuard::unsubscribe`], and
/// [`EventBus::emit`].
///
/// # Example
/// ```rust
/// use mdesk_event_bus::{Event, EventBus, EventBusError, Subscriber};
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct Ping { room: String }
///
/// impl Event for Ping {
///     fn channel(&self) -> &str { &self.room }
/// }
///
/// #[derive(Debug)]
/// struct Sink;
///
/// impl Subscriber<Ping> for Sink {
///     fn deliver(&self, _event: Arc<Ping>) -> Result<(), EventBusError> { Ok(()) }
/// }
///
/// let bus: EventBus<Ping> = EventBus::new();
/// let guard = bus.subscribe("lobby", Arc::new(Sink));
/// assert_eq!(bus.emit(Ping { room: "lobby".into() }), 1);
/// drop(guard);
/// assert_eq!(bus.emit(Ping { room: "lobby".into() }), 0);
/// ```
pub struct EventBus<T: Event> {
    channels: Arc<RwLock<ChannelMap<T>>>,
    next_id: Arc<AtomicU64>,
}

impl<T: Event> EventBus<T> {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `subscriber` under `channel`, creating the channel entry on
    /// first use.
    ///
    /// The returned guard is the only way to remove the registration. It
    /// unsubscribes on [`Drop`], so a subscriber's lifetime is tied to the
    /// connection (or test scope) that owns the guard.
    #[must_use = "dropping the guard unsubscribes immediately"]
    pub fn subscribe(
        &self,
        channel: impl Into<String>,
        subscriber: Arc<dyn Subscriber<T>>,
    ) -> SubscriptionGuard<T> {
        let channel = channel.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        {
            let mut channels = self.channels.write();
            let entries = channels.entry(channel.clone()).or_insert_with(|| {
                trace!(channel = %channel, "Initializing new event channel");
                Vec::new()
            });
            entries.push((id, subscriber));
        }

        trace!(channel = %channel, subscriber = id, "Subscriber registered");
        SubscriptionGuard { channel, id, channels: Arc::downgrade(&self.channels) }
    }

    /// Dispatches `event` to every subscriber currently registered on
    /// `event.channel()`, in subscription order.
    ///
    /// The subscriber list is snapshotted as a single atomic step, so a
    /// concurrent subscribe/unsubscribe never interleaves mid-dispatch.
    /// Individual delivery failures are logged and discarded; they neither
    /// abort the fan-out nor surface to the publisher.
    ///
    /// Returns the number of successful deliveries. Emitting to a channel
    /// with no subscribers returns 0 and has no other effect.
    pub fn emit(&self, event: T) -> usize {
        let event = Arc::new(event);

        let snapshot: Registrations<T> = {
            let channels = self.channels.read();
            match channels.get(event.channel()) {
                Some(entries) if !entries.is_empty() => entries.clone(),
                _ => {
                    trace!(channel = event.channel(), "Event dropped: no active subscribers");
                    return 0;
                },
            }
        };

        let mut delivered = 0usize;
        for (id, subscriber) in &snapshot {
            match subscriber.deliver(event.clone()) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    debug!(
                        channel = event.channel(),
                        subscriber = id,
                        error = %err,
                        "Subscriber delivery failed; continuing fan-out"
                    );
                },
            }
        }

        trace!(
            channel = event.channel(),
            delivered,
            subscribers = snapshot.len(),
            "Event dispatched"
        );
        delivered
    }

    /// Number of subscribers currently registered on `channel`.
    #[must_use]
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels.read().get(channel).map_or(0, Vec::len)
    }
}

impl<T: Event> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            channels: Arc::new(RwLock::new(ChannelMap::default())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<T: Event> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self { channels: self.channels.clone(), next_id: self.next_id.clone() }
    }
}

impl<T: Event> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").field("channels", &self.channels.read().len()).finish()
    }
}

/// Capability that removes exactly one registration from exactly one channel.
///
/// Safe to invoke more than once; removal of an already-removed subscriber is
/// a no-op. Dropping the guard unsubscribes as well, so teardown happens
/// synchronously when the owning connection goes away.
pub struct SubscriptionGuard<T: Event> {
    channel: String,
    id: SubscriberId,
    channels: Weak<RwLock<ChannelMap<T>>>,
}

impl<T: Event> SubscriptionGuard<T> {
    /// Removes this subscriber from its channel. Idempotent.
    pub fn unsubscribe(&self) {
        let Some(channels) = self.channels.upgrade() else {
            // Registry already gone; nothing left to release.
            return;
        };

        let mut channels = channels.write();
        if let Some(entries) = channels.get_mut(&self.channel) {
            let before = entries.len();
            entries.retain(|(id, _)| *id != self.id);
            if entries.len() < before {
                trace!(channel = %self.channel, subscriber = self.id, "Subscriber removed");
            }
        }
    }

    /// The channel key this guard is bound to.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl<T: Event> Drop for SubscriptionGuard<T> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl<T: Event> fmt::Debug for SubscriptionGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionGuard")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .finish()
    }
}
