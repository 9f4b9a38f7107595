//! Presence feature slice: realtime typing-indicator broadcast.
//!
//! A typed facade over the event bus plus the HTTP surface: an ingest
//! endpoint (`POST /typing`) and a long-lived SSE stream per subscriber
//! (`GET /typing/stream`). Everything is best-effort and in-memory; nothing
//! is persisted or replayed.

mod channels;
mod error;
mod event;
mod routes;
mod stream;

pub use crate::channels::TypingChannels;
pub use crate::error::PresenceError;
pub use crate::event::{TypingDraft, TypingEvent};
pub use crate::routes::router;
pub use crate::stream::TypingEventStream;

use mdesk_kernel::domain::config::ApiConfig;
use mdesk_kernel::domain::registry::{FeatureSlice, InitializedSlice};

/// Presence feature state: owns the process-wide typing registry.
#[derive(Debug)]
pub struct Presence {
    channels: TypingChannels,
}

impl Presence {
    #[must_use]
    pub fn channels(&self) -> &TypingChannels {
        &self.channels
    }
}

impl FeatureSlice for Presence {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Initialize the presence feature.
///
/// Builds the typing registry from the presence configuration. The registry
/// lives for the process lifetime and is only reachable through this slice.
///
/// # Errors
/// Currently infallible; the signature matches the slice-initialization
/// contract shared by all features.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, PresenceError> {
    tracing::info!(
        default_channel = %config.presence.default_channel,
        "Presence slice initialized"
    );

    let channels = TypingChannels::new(&config.presence);

    Ok(InitializedSlice::new(Presence { channels }))
}
