//! Plan analysis orchestration
//!
//! Fetches the base plan, explores alternatives, then summarizes and
//! narrates every distinct plan in discovery order. Collaborator failures
//! leave as a classified `AnalysisError`.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::annotate::AnnotatorRegistry;
use crate::observability::{MetricsRegistry, ObservationScope};
use crate::plan::{PlanResult, PlanTree};
use crate::session::{run_explain, PlannerSession, SessionProvider};

use super::errors::{AnalysisError, AnalysisResult};
use super::explorer::{AlternativePlanExplorer, DiscoveredPlan};
use super::narrator::narrate_with;
use super::summary::{summarize, PlanSummary};

/// One plan with everything the presentation layer shows for it
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    /// The raw plan tree, for a JSON viewer
    pub plan: PlanTree,
    pub summary: PlanSummary,
    /// One sentence per node, reversed level order
    pub narration: Vec<String>,
    /// Knobs disabled to obtain this plan; empty for the base plan
    pub disabled_knobs: Vec<&'static str>,
}

/// Result of analyzing one query: one to three distinct plans, base first
#[derive(Debug, Clone, Serialize)]
pub struct AlternativeSet {
    pub analysis_id: Uuid,
    pub query: String,
    pub plans: Vec<PlanReport>,
}

impl AlternativeSet {
    /// Number of distinct plans found
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Always false for a successful analysis
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// The planner's unconstrained choice
    pub fn base(&self) -> Option<&PlanReport> {
        self.plans.first()
    }
}

/// Runs whole analyses against a planner session
#[derive(Debug, Clone)]
pub struct PlanAnalyzer {
    registry: AnnotatorRegistry,
    explorer: AlternativePlanExplorer,
    metrics: Arc<MetricsRegistry>,
}

impl Default for PlanAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanAnalyzer {
    /// Analyzer with the built-in templates and private metrics
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(MetricsRegistry::new()))
    }

    /// Analyzer reporting into shared metrics
    pub fn with_metrics(metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            registry: AnnotatorRegistry::new(),
            explorer: AlternativePlanExplorer::new(Arc::clone(&metrics)),
            metrics,
        }
    }

    /// Replace the annotator registry (custom templates or emphasis)
    pub fn with_registry(mut self, registry: AnnotatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &AnnotatorRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Analyze `query` on a session the caller owns.
    ///
    /// The session is left with default planner settings whatever the
    /// outcome.
    pub fn analyze<S: PlannerSession + ?Sized>(
        &self,
        session: &mut S,
        query: &str,
    ) -> AnalysisResult<AlternativeSet> {
        if query.trim().is_empty() {
            self.metrics.increment_analyses_failed();
            return Err(AnalysisError::EmptyQuery);
        }

        let analysis_id = Uuid::new_v4();
        let id_field = analysis_id.to_string();
        let scope =
            ObservationScope::with_fields("ANALYSIS", &[("analysis_id", id_field.as_str())]);

        match self.run(session, query) {
            Ok(plans) => {
                self.metrics.increment_analyses_completed();
                let count = plans.len().to_string();
                scope.complete_with_fields(&[("plans", count.as_str())]);
                Ok(AlternativeSet {
                    analysis_id,
                    query: query.to_string(),
                    plans,
                })
            }
            Err(e) => {
                self.metrics.increment_analyses_failed();
                scope.fail(&format!("{}: {}", e.code(), e.detail()));
                Err(e)
            }
        }
    }

    /// Open a fresh session from `provider` and analyze `query` on it
    pub fn analyze_with(
        &self,
        provider: &dyn SessionProvider,
        query: &str,
    ) -> AnalysisResult<AlternativeSet> {
        if query.trim().is_empty() {
            self.metrics.increment_analyses_failed();
            return Err(AnalysisError::EmptyQuery);
        }
        let mut session = provider.open().map_err(|e| {
            self.metrics.increment_analyses_failed();
            AnalysisError::from(e)
        })?;
        self.analyze(&mut session, query)
    }

    /// Summary and narration of a single plan, without probing
    pub fn report(&self, plan: PlanTree) -> PlanResult<PlanReport> {
        self.report_discovered(DiscoveredPlan {
            plan,
            disabled_knobs: Vec::new(),
        })
    }

    fn report_discovered(&self, discovered: DiscoveredPlan) -> PlanResult<PlanReport> {
        let summary = summarize(&discovered.plan)?;
        let narration = narrate_with(&discovered.plan, &self.registry);
        Ok(PlanReport {
            plan: discovered.plan,
            summary,
            narration,
            disabled_knobs: discovered.disabled_knobs,
        })
    }

    fn run<S: PlannerSession + ?Sized>(
        &self,
        session: &mut S,
        query: &str,
    ) -> AnalysisResult<Vec<PlanReport>> {
        let base = run_explain(session, query, &Default::default())?;
        let discovered = self.explorer.explore(session, query, base)?;

        let mut reports = Vec::with_capacity(discovered.len());
        for plan in discovered {
            reports.push(self.report_discovered(plan)?);
        }
        Ok(reports)
    }
}
