use crate::channels::TypingChannels;
use crate::event::TypingEvent;
use axum::response::sse::Event as SseEvent;
use mdesk_event_bus::{EventBusError, Subscriber, SubscriptionGuard};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::Stream;

/// Write-to-stream subscriber: forwards bus events into the per-connection
/// queue. Delivery is best-effort — once the connection is gone the send
/// fails and the bus discards the error.
#[derive(Debug)]
struct StreamSink {
    tx: mpsc::UnboundedSender<Arc<TypingEvent>>,
}

impl Subscriber<TypingEvent> for StreamSink {
    fn deliver(&self, event: Arc<TypingEvent>) -> Result<(), EventBusError> {
        self.tx.send(event).map_err(|_| EventBusError::delivery("stream connection closed"))
    }
}

/// One subscription exposed as an SSE event stream.
///
/// Exactly one instance exists per open client connection and it owns exactly
/// one bus registration for its lifetime. Each bus event becomes exactly one
/// SSE frame (`event: typing` + one JSON `data:` line). Dropping the stream —
/// which axum does synchronously when the client disconnects — releases the
/// registration through the held guard, so no writes can target a closed
/// connection afterwards.
#[derive(Debug)]
pub struct TypingEventStream {
    rx: mpsc::UnboundedReceiver<Arc<TypingEvent>>,
    _subscription: SubscriptionGuard<TypingEvent>,
}

impl TypingEventStream {
    /// Subscribes to `channel` (or the default channel when `None`) and
    /// returns the connection's event stream.
    #[must_use]
    pub fn open(channels: &TypingChannels, channel: Option<&str>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = channels.subscribe(channel, Arc::new(StreamSink { tx }));
        Self { rx, _subscription: subscription }
    }
}

impl Stream for TypingEventStream {
    type Item = Result<SseEvent, axum::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(event)) => {
                Poll::Ready(Some(SseEvent::default().event("typing").json_data(&*event)))
            },
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
