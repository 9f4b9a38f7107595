use crate::bus::Event;
use crate::error::EventBusError;
use std::sync::Arc;

/// A registered delivery target, bound to exactly one channel.
///
/// The bus invokes subscribers synchronously during [`EventBus::emit`] and
/// treats each delivery as isolated: a returned error is logged and discarded
/// without affecting the remaining subscribers or the publisher.
///
/// Events are handed over as `Arc<T>` so sinks can retain them cheaply while
/// the shared value stays immutable.
///
/// [`EventBus::emit`]: crate::EventBus::emit
pub trait Subscriber<T: Event>: Send + Sync + 'static {
    /// Deliver one event to this sink.
    ///
    /// # Errors
    /// Returns [`EventBusError::Delivery`] when the sink cannot accept the
    /// event (for instance, the underlying connection is already closed).
    fn deliver(&self, event: Arc<T>) -> Result<(), EventBusError>;
}

/// Closures can act as subscribers directly; handy for tests and thin
/// adapters that only forward events.
impl<T, F> Subscriber<T> for F
where
    T: Event,
    F: Fn(Arc<T>) -> Result<(), EventBusError> + Send + Sync + 'static,
{
    fn deliver(&self, event: Arc<T>) -> Result<(), EventBusError> {
        self(event)
    }
}
