//! Alternative plan discovery
//!
//! Starting from the base plan, each probe disables every strategy the
//! most recently accepted plan uses and asks the planner again. A probe's
//! plan is kept only if it is equivalent to none of the plans already
//! found. Exactly two probes run, whatever their outcome, so at most three
//! plans come back. Probes are strictly sequential: probe N's knobs depend
//! on the plan accepted before it.

use std::sync::Arc;

use crate::observability::{Event, Logger, MetricsRegistry};
use crate::plan::PlanTree;
use crate::session::{knobs_for_plan, run_explain, ExplainError, PlannerSession};

use super::signature::{signature, PlanSignature};

/// Number of re-plan requests per exploration
pub const MAX_PROBES: usize = 2;

/// A distinct plan and the knobs that were disabled to obtain it
#[derive(Debug, Clone)]
pub struct DiscoveredPlan {
    pub plan: PlanTree,
    /// Empty for the base plan
    pub disabled_knobs: Vec<&'static str>,
}

/// Finds structurally distinct alternatives to a base plan
#[derive(Debug, Clone, Default)]
pub struct AlternativePlanExplorer {
    metrics: Arc<MetricsRegistry>,
}

impl AlternativePlanExplorer {
    /// Explorer reporting into `metrics`
    pub fn new(metrics: Arc<MetricsRegistry>) -> Self {
        Self { metrics }
    }

    /// Probe for up to two alternatives to `base`.
    ///
    /// The base plan is always first. A failed probe aborts exploration
    /// and is returned to the caller; the session's settings have already
    /// been restored by then.
    pub fn explore<S: PlannerSession + ?Sized>(
        &self,
        session: &mut S,
        query: &str,
        base: PlanTree,
    ) -> Result<Vec<DiscoveredPlan>, ExplainError> {
        let mut signatures: Vec<PlanSignature> = vec![signature(&base)];
        let mut found = vec![DiscoveredPlan {
            plan: base,
            disabled_knobs: Vec::new(),
        }];

        for probe in 1..=MAX_PROBES {
            let basis = &found[found.len() - 1].plan;
            let knobs = knobs_for_plan(basis);
            let knob_list: Vec<&'static str> = knobs.iter().copied().collect();
            let knob_field = knob_list.join(",");
            let probe_field = probe.to_string();

            Logger::info(
                Event::ProbeIssued.as_str(),
                &[("knobs", knob_field.as_str()), ("probe", probe_field.as_str())],
            );
            self.metrics.increment_probes();

            let candidate = run_explain(session, query, &knobs)?;
            let candidate_sig = signature(&candidate);

            if signatures.contains(&candidate_sig) {
                self.metrics.increment_rejected();
                Logger::info(
                    Event::AlternativeRejected.as_str(),
                    &[("probe", probe_field.as_str())],
                );
                continue;
            }

            self.metrics.increment_accepted();
            Logger::info(
                Event::AlternativeAccepted.as_str(),
                &[
                    ("probe", probe_field.as_str()),
                    ("root", candidate.root().node_type()),
                ],
            );
            signatures.push(candidate_sig);
            found.push(DiscoveredPlan {
                plan: candidate,
                disabled_knobs: knob_list,
            });
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{PlanCatalog, ReplaySession, SessionError};
    use serde_json::{json, Value};

    const Q: &str = "SELECT * FROM region";

    fn seq_scan() -> Value {
        json!({"Node Type": "Seq Scan", "Relation Name": "region", "Total Cost": 1.05})
    }

    fn index_scan() -> Value {
        json!({"Node Type": "Index Scan", "Index Name": "region_pkey",
               "Relation Name": "region", "Total Cost": 8.15})
    }

    fn bitmap_scan() -> Value {
        json!({"Node Type": "Bitmap Heap Scan", "Relation Name": "region",
               "Recheck Cond": "(r_regionkey = 1)", "Total Cost": 9.0,
               "Plans": [{"Node Type": "Bitmap Index Scan", "Index Name": "region_pkey",
                          "Index Cond": "(r_regionkey = 1)", "Total Cost": 4.0}]})
    }

    fn base(catalog: &PlanCatalog) -> PlanTree {
        PlanTree::from_explain_json(catalog.lookup(Q, &Default::default()).unwrap()).unwrap()
    }

    fn explore(catalog: PlanCatalog) -> (Result<Vec<DiscoveredPlan>, ExplainError>, ReplaySession) {
        let base = base(&catalog);
        let mut session = ReplaySession::new(Arc::new(catalog));
        let explorer = AlternativePlanExplorer::default();
        let result = explorer.explore(&mut session, Q, base);
        (result, session)
    }

    #[test]
    fn test_no_alternative() {
        let catalog = PlanCatalog::new().with_plan(Q, &[], seq_scan());
        let (result, session) = explore(catalog);
        let plans = result.unwrap();
        assert_eq!(plans.len(), 1);
        assert!(plans[0].disabled_knobs.is_empty());
        // Both probes still ran
        assert_eq!(session.explain_count(), 2);
        assert!(session.disabled_knobs().is_empty());
    }

    #[test]
    fn test_chain_of_three() {
        let catalog = PlanCatalog::new()
            .with_plan(Q, &[], seq_scan())
            .with_plan(Q, &["enable_seqscan"], index_scan())
            .with_plan(Q, &["enable_indexscan"], bitmap_scan());
        let (result, _) = explore(catalog);
        let plans = result.unwrap();

        let roots: Vec<_> = plans.iter().map(|p| p.plan.root().node_type()).collect();
        assert_eq!(roots, vec!["Seq Scan", "Index Scan", "Bitmap Heap Scan"]);
        assert_eq!(plans[1].disabled_knobs, vec!["enable_seqscan"]);
        // Second probe is based on the index scan, not the base plan
        assert_eq!(plans[2].disabled_knobs, vec!["enable_indexscan"]);
    }

    #[test]
    fn test_probe_back_to_base_is_rejected() {
        // Disabling the index scan sends the planner back to the seq scan
        let catalog = PlanCatalog::new()
            .with_plan(Q, &[], seq_scan())
            .with_plan(Q, &["enable_seqscan"], index_scan());
        let (result, session) = explore(catalog);
        let plans = result.unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(session.explain_count(), 2);
    }

    #[test]
    fn test_cost_only_difference_is_rejected() {
        let mut cheaper = seq_scan();
        cheaper["Total Cost"] = json!(0.5);
        let catalog = PlanCatalog::new()
            .with_plan(Q, &[], seq_scan())
            .with_plan(Q, &["enable_seqscan"], cheaper);
        let (result, _) = explore(catalog);
        assert_eq!(result.unwrap().len(), 1);
    }

    #[test]
    fn test_all_returned_plans_distinct() {
        let catalog = PlanCatalog::new()
            .with_plan(Q, &[], seq_scan())
            .with_plan(Q, &["enable_seqscan"], index_scan())
            .with_plan(Q, &["enable_indexscan"], seq_scan());
        let (result, _) = explore(catalog);
        let plans = result.unwrap();
        assert!(plans.len() <= 3);
        for (i, a) in plans.iter().enumerate() {
            for b in plans.iter().skip(i + 1) {
                assert_ne!(signature(&a.plan), signature(&b.plan));
            }
        }
    }

    #[test]
    fn test_failed_probe_propagates() {
        // Base plan recorded only under a knob the probe never sets
        let catalog = PlanCatalog::new().with_plan(Q, &["enable_sort"], seq_scan());
        let base = PlanTree::from_explain_json(&seq_scan()).unwrap();
        let mut session = ReplaySession::new(Arc::new(catalog));
        let err = AlternativePlanExplorer::default()
            .explore(&mut session, Q, base)
            .unwrap_err();
        assert!(matches!(err, ExplainError::Session(SessionError::Failed(_))));
        assert!(session.disabled_knobs().is_empty());
    }
}
