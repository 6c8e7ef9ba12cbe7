//! Keep-alive pinger.
//!
//! Periodically sends a minimal shout upstream so an idle hosting instance is
//! not suspended. Failures are logged and never surfaced.

pub mod pinger;

pub use pinger::KeepAlive;
