//! Observability for planlens
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed events
//! - Counter metrics
//!
//! # Usage
//!
//! ```ignore
//! use planlens::observability::{Event, Logger, MetricsRegistry, ObservationScope};
//!
//! Logger::info(Event::ProbeIssued.as_str(), &[("knobs", "enable_seqscan")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_probes();
//!
//! let scope = ObservationScope::new("ANALYSIS");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::ObservationScope;
