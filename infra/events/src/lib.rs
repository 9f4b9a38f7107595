//! # Event Bus
//!
//! A thread-safe, channel-keyed publish/subscribe registry for realtime
//! fan-out.
//!
//! ## Overview
//!
//! Provides a process-wide [`EventBus`] mapping opaque channel keys to
//! ordered subscriber sets. Publishing dispatches synchronously to every
//! subscriber of the event's channel; each delivery is isolated, so one
//! failing sink never blocks the rest of the fan-out or the publisher.
//!
//! ## Features
//!
//! * **Channel isolation**: events reach only subscribers of the same key.
//! * **Ordered dispatch**: within a channel, subscribers observe events in
//!   emit order.
//! * **Guard-based lifecycle**: [`SubscriptionGuard`] releases exactly one
//!   registration, idempotently, and on drop.
//! * **High Performance**: `FxHashMap` + `parking_lot::RwLock`.
//!
//! # Example
//!
//! ```rust
//! use mdesk_event_bus::{Event, EventBus, EventBusError, Subscriber};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct RoomEvent { room: String, seq: u32 }
//!
//! impl Event for RoomEvent {
//!     fn channel(&self) -> &str { &self.room }
//! }
//!
//! #[derive(Debug, Default)]
//! struct Counter(std::sync::atomic::AtomicUsize);
//!
//! impl Subscriber<RoomEvent> for Counter {
//!     fn deliver(&self, _event: Arc<RoomEvent>) -> Result<(), EventBusError> {
//!         self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//!
//! let bus: EventBus<RoomEvent> = EventBus::new();
//! let counter = Arc::new(Counter::default());
//! let _guard = bus.subscribe("alpha", counter.clone());
//!
//! bus.emit(RoomEvent { room: "alpha".into(), seq: 1 });
//! bus.emit(RoomEvent { room: "bravo".into(), seq: 2 });
//!
//! assert_eq!(counter.0.load(std::sync::atomic::Ordering::SeqCst), 1);
//! ```

mod bus;
mod error;
mod subscriber;

pub use bus::{Event, EventBus, SubscriptionGuard};
pub use error::EventBusError;
pub use subscriber::Subscriber;
