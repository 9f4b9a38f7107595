//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports ergonomic helpers for config loading
//! and the shared server state.
//!
//! ## Config loading
//! ```rust,ignore
//! use mdesk_kernel::config::load_config;
//! use mdesk_kernel::prelude::ApiConfig;
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use mdesk_domain as domain;
