//! License-key verification against the licensing service.
//!
//! # Responsibilities
//! - Pull the license key out of the configured request header
//! - Confirm the key with the licensing service before any upstream call
//!
//! # Design Decisions
//! - A 404 from the licensing service and a transport failure are both
//!   reported as `BAD LICENCE`; every other status is accepted
//! - No caching: each request is verified independently

pub mod verifier;

pub use verifier::{extract_license_key, LicenseVerifier};
