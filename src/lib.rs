//! Shout relay library.

pub mod config;
pub mod http;
pub mod keepalive;
pub mod license;
pub mod lifecycle;
pub mod observability;
pub mod shout;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
