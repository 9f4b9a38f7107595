use mdesk_event_bus::Event;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A typing indicator, visible to every subscriber of its channel.
///
/// Immutable once constructed; exists only for the duration of the fan-out
/// (nothing is persisted or replayed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TypingEvent {
    /// Channel (room/group) the indicator belongs to.
    pub channel: String,
    /// Display name of the user typing.
    pub user: String,
    /// Whether the user started (`true`) or stopped (`false`) typing.
    pub typing: bool,
    /// Unix milliseconds, stamped at publish time.
    pub timestamp: i64,
}

impl Event for TypingEvent {
    fn channel(&self) -> &str {
        &self.channel
    }
}

/// Publisher-supplied fields before defaulting.
///
/// Every field is optional: absent values are filled in by
/// [`TypingChannels::publish`], so a malformed or empty ingest body still
/// produces a valid event.
///
/// [`TypingChannels::publish`]: crate::TypingChannels::publish
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct TypingDraft {
    pub channel: Option<String>,
    pub user: Option<String>,
    pub typing: Option<bool>,
}
