//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher + http server produce:
//!     → logging.rs (structured log events, request id in fields)
//!     → metrics.rs (dispatch outcome counters and latency)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
