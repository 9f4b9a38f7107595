use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    /// A subscriber sink rejected a delivery (e.g. its connection is gone).
    /// The dispatch loop discards this error; it never reaches publishers.
    #[error("Delivery failed{}: {message}", format_context(.context))]
    Delivery { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl EventBusError {
    /// Shorthand for a [`EventBusError::Delivery`] without extra context.
    pub fn delivery(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Delivery { message: message.into(), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
