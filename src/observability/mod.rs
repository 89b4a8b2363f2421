//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (per-request counter + latency histogram)
//!
//! Consumers:
//!     → stdout (structured logs)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all log events
//! - Metrics are cheap (atomic increments)
//! - Labels limited to method, status, action to bound cardinality

pub mod logging;
pub mod metrics;
