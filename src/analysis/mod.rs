//! Plan analysis
//!
//! Summaries, structural comparison, narration, alternative discovery and
//! the `PlanAnalyzer` that ties them together for one query.

mod errors;
mod explorer;
mod narrator;
mod orchestrator;
mod signature;
mod summary;

pub use errors::{AnalysisError, AnalysisResult, ErrorKind};
pub use explorer::{AlternativePlanExplorer, DiscoveredPlan, MAX_PROBES};
pub use narrator::{narrate, narrate_with};
pub use orchestrator::{AlternativeSet, PlanAnalyzer, PlanReport};
pub use signature::{equivalent, signature, PlanSignature};
pub use summary::{summarize, PlanSummary};
