//! Ergonomic re-exports for downstream crates.

pub use crate::config::{ConfigError, load_config};
#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateBuilder, ApiStateError};
pub use mdesk_domain::config::ApiConfig;
pub use mdesk_domain::registry::{FeatureSlice, InitializedSlice};
