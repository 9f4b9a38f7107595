use std::borrow::Cow;

/// Errors raised while initializing or operating the presence feature.
#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    #[error("Presence error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
