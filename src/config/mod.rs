//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: PORT, SHOUT_UPSTREAM_URL)
//!     → validation.rs (semantic checks, once, after overrides)
//!     → RelayConfig (validated, immutable)
//!     → cloned into the HTTP server and background tasks
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults so the relay runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, parse_config, resolve_config, ConfigError};
pub use schema::{
    KeepAliveConfig, LicenseConfig, ListenerConfig, ObservabilityConfig, RelayConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
