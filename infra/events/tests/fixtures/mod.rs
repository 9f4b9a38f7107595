use mdesk_event_bus::{Event, EventBusError, Subscriber};
use parking_lot::Mutex;
use std::sync::Arc;

/// Minimal routed event for bus tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEvent {
    pub channel: String,
    pub seq: u32,
}

impl Event for TestEvent {
    fn channel(&self) -> &str {
        &self.channel
    }
}

pub fn event(channel: &str, seq: u32) -> TestEvent {
    TestEvent { channel: channel.to_owned(), seq }
}

/// Record-to-buffer subscriber.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Mutex<Vec<Arc<TestEvent>>>,
}

impl Recorder {
    pub fn received(&self) -> Vec<Arc<TestEvent>> {
        self.events.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }
}

impl Subscriber<TestEvent> for Recorder {
    fn deliver(&self, event: Arc<TestEvent>) -> Result<(), EventBusError> {
        self.events.lock().push(event);
        Ok(())
    }
}

/// Sink that always rejects delivery, standing in for a torn-down connection.
#[derive(Debug)]
pub struct FailingSink;

impl Subscriber<TestEvent> for FailingSink {
    fn deliver(&self, _event: Arc<TestEvent>) -> Result<(), EventBusError> {
        Err(EventBusError::delivery("sink closed"))
    }
}
