//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! api.rs / store / http layers produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (operation counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request span by the HTTP layer
//! - Metrics are cheap when no exporter is installed

pub mod logging;
pub mod metrics;
