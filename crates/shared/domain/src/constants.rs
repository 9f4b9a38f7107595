//! Shared literal constants for routes, OpenAPI tags, and presence defaults.

/// OpenAPI tag for system endpoints (health, docs).
pub const SYSTEM_TAG: &str = "system";

/// OpenAPI tag for the presence/typing endpoints.
pub const PRESENCE_TAG: &str = "presence";

/// Channel key used when a publisher or stream omits one.
pub const DEFAULT_CHANNEL: &str = "general";

/// Placeholder user name for anonymous typing events.
pub const ANONYMOUS_USER: &str = "anonymous";
