//! Observable events
//!
//! Events are explicit and typed; the string form is what appears in the
//! `event` field of a log line. Analysis lifecycle lines
//! (`ANALYSIS_BEGIN`, `ANALYSIS_COMPLETE`, `ANALYSIS_FAILED`) come from the
//! `ObservationScope` wrapped around each request.

use std::fmt;

/// Observable events in planlens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// HTTP server listening
    ServerStart,

    // Exploration
    /// Re-plan requested with knobs disabled
    ProbeIssued,
    /// Probe produced a new distinct plan
    AlternativeAccepted,
    /// Probe produced a plan equivalent to one already found
    AlternativeRejected,
    /// Planner settings could not be restored after a probe
    KnobResetFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",

            Event::ProbeIssued => "PROBE_ISSUED",
            Event::AlternativeAccepted => "ALTERNATIVE_ACCEPTED",
            Event::AlternativeRejected => "ALTERNATIVE_REJECTED",
            Event::KnobResetFailed => "KNOB_RESET_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
