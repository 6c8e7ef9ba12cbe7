//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, upstream client, license verifier, keep-alive pinger
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via `metrics`)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) is attached to every request span
//! - Metric calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
