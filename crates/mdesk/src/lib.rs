//! Facade crate for `MissionDesk` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `mdesk` with the desired feature flags (`server`).
//! - Call `mdesk::init` (server) to register feature slices; extend as new slices appear.

pub use mdesk_domain as domain;
#[cfg(feature = "server")]
use mdesk_domain::config::ApiConfig;
pub use mdesk_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use mdesk_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    #[cfg(feature = "server")]
    pub use mdesk_presence as presence;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "server")]
        "presence",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    config: &ApiConfig,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Presence (typing indicators)
    slices.push(features::presence::init(config)?);

    Ok(slices)
}
