use crate::event::{TypingDraft, TypingEvent};
use mdesk_domain::config::PresenceConfig;
use mdesk_domain::constants::ANONYMOUS_USER;
use mdesk_event_bus::{EventBus, Subscriber, SubscriptionGuard};
use std::sync::Arc;
use tracing::trace;

/// Domain-typed facade over the event bus for typing indicators.
///
/// Defines the event shape and channel-key convention for the presence
/// feature; constructed once at startup and threaded through the routes via
/// the feature slice, so tests can build isolated registries per case.
#[derive(Debug, Clone)]
pub struct TypingChannels {
    bus: EventBus<TypingEvent>,
    default_channel: String,
}

impl TypingChannels {
    #[must_use]
    pub fn new(config: &PresenceConfig) -> Self {
        Self { bus: EventBus::new(), default_channel: config.default_channel.clone() }
    }

    /// Fills in missing draft fields, stamps the timestamp, and broadcasts.
    ///
    /// Defaults: absent channel → the configured default channel key; absent
    /// user → `"anonymous"`; absent typing flag → `false`.
    ///
    /// Returns the number of subscribers the event was delivered to. A
    /// publisher never observes per-subscriber outcomes.
    pub fn publish(&self, draft: TypingDraft) -> usize {
        let event = TypingEvent {
            channel: draft.channel.unwrap_or_else(|| self.default_channel.clone()),
            user: draft.user.unwrap_or_else(|| ANONYMOUS_USER.to_owned()),
            typing: draft.typing.unwrap_or(false),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        trace!(channel = %event.channel, user = %event.user, typing = event.typing, "Publishing typing event");
        self.bus.emit(event)
    }

    /// Registers `subscriber` on `channel` (or the default channel when
    /// `None`). Thin pass-through to the bus.
    #[must_use = "dropping the guard unsubscribes immediately"]
    pub fn subscribe(
        &self,
        channel: Option<&str>,
        subscriber: Arc<dyn Subscriber<TypingEvent>>,
    ) -> SubscriptionGuard<TypingEvent> {
        let channel = channel.unwrap_or(&self.default_channel);
        self.bus.subscribe(channel, subscriber)
    }

    /// The channel key used when publishers/streams omit one.
    #[must_use]
    pub fn default_channel(&self) -> &str {
        &self.default_channel
    }

    /// Number of open subscriptions on `channel` (diagnostics/tests).
    #[must_use]
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.bus.subscriber_count(channel)
    }
}
