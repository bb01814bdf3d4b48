//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! auth, routing, config produce:
//!     → tracing events (registration, resolution misses, reloads)
//!     → metrics.rs (scheme gauge, resolution counters)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//!     → whatever `metrics` recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - The library emits; the host decides where it goes
//! - Log level configurable via config, overridden by `RUST_LOG`
//! - No metrics exporter is bundled

pub mod logging;
pub mod metrics;
