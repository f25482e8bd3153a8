//! Planner session: the collaborator that produces plans
//!
//! The analysis engine never talks to a planner directly. It receives a
//! `PlannerSession` owned by the caller, one per request, and changes its
//! settings only through a `KnobOverride` scope.

mod errors;
mod knobs;
mod replay;
mod scope;

pub use errors::{ExplainError, SessionError, SessionResult};
pub use knobs::{is_known_knob, knob_for, knobs_for_plan, node_types, KNOB_TABLE};
pub use replay::{normalize_query, CatalogEntry, CatalogSessions, PlanCatalog, ReplaySession};
pub use scope::KnobOverride;

use std::collections::BTreeSet;

use serde_json::Value;

use crate::plan::PlanTree;

/// A stateful planner connection with mutable strategy settings
pub trait PlannerSession {
    /// Restore every planner setting to its default
    fn reset_knobs(&mut self) -> SessionResult<()>;

    /// Turn one strategy setting on or off until the next reset
    fn set_knob(&mut self, knob: &str, enabled: bool) -> SessionResult<()>;

    /// Cost-only EXPLAIN of `query` under the current settings, as the
    /// planner's JSON document
    fn explain(&mut self, query: &str) -> SessionResult<Value>;
}

impl<S: PlannerSession + ?Sized> PlannerSession for Box<S> {
    fn reset_knobs(&mut self) -> SessionResult<()> {
        (**self).reset_knobs()
    }

    fn set_knob(&mut self, knob: &str, enabled: bool) -> SessionResult<()> {
        (**self).set_knob(knob, enabled)
    }

    fn explain(&mut self, query: &str) -> SessionResult<Value> {
        (**self).explain(query)
    }
}

/// Source of isolated sessions, one per analysis request
pub trait SessionProvider: Send + Sync {
    /// Open a fresh session
    fn open(&self) -> SessionResult<Box<dyn PlannerSession + Send>>;
}

/// Plan `query` with the given strategies disabled for this call only.
///
/// Settings are restored before returning, whether the explain succeeds,
/// fails, or returns an unparseable document.
pub fn run_explain<S: PlannerSession + ?Sized>(
    session: &mut S,
    query: &str,
    disabled: &BTreeSet<&'static str>,
) -> Result<PlanTree, ExplainError> {
    let mut scope = KnobOverride::acquire(session, disabled)?;
    let document = scope.session().explain(query)?;
    scope.release()?;
    Ok(PlanTree::from_explain_json(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn catalog() -> PlanCatalog {
        PlanCatalog::new()
            .with_plan(
                "SELECT 1",
                &[],
                json!([{"Plan": {"Node Type": "Result", "Total Cost": 0.01}}]),
            )
            .with_plan("SELECT broken", &[], json!([{"Plan": {"Node Type": "Result"}}]))
    }

    #[test]
    fn test_run_explain_parses_plan() {
        let mut session = ReplaySession::new(Arc::new(catalog()));
        let tree = run_explain(&mut session, "SELECT 1", &BTreeSet::new()).unwrap();
        assert_eq!(tree.root().node_type(), "Result");
    }

    #[test]
    fn test_run_explain_restores_knobs_on_success() {
        let mut session = ReplaySession::new(Arc::new(catalog()));
        let knobs: BTreeSet<_> = ["enable_seqscan"].into_iter().collect();
        run_explain(&mut session, "SELECT 1", &knobs).unwrap();
        assert!(session.disabled_knobs().is_empty());
    }

    #[test]
    fn test_run_explain_restores_knobs_on_failure() {
        let mut session = ReplaySession::new(Arc::new(catalog()));
        let knobs: BTreeSet<_> = ["enable_sort"].into_iter().collect();

        let err = run_explain(&mut session, "SELECT nothing", &knobs).unwrap_err();
        assert!(matches!(err, ExplainError::Session(SessionError::InvalidQuery(_))));
        assert!(session.disabled_knobs().is_empty());

        let err = run_explain(&mut session, "SELECT broken", &knobs).unwrap_err();
        assert!(matches!(err, ExplainError::Plan(_)));
        assert!(session.disabled_knobs().is_empty());
    }

    #[test]
    fn test_boxed_session() {
        let provider = CatalogSessions::from_catalog(catalog());
        let mut session = provider.open().unwrap();
        let tree = run_explain(&mut session, "SELECT 1", &BTreeSet::new()).unwrap();
        assert_eq!(tree.root().total_cost(), Some(0.01));
    }
}
