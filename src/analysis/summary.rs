//! Plan summary: total estimated cost and node count

use serde::Serialize;

use crate::plan::{PlanError, PlanResult, PlanTree, TOTAL_COST};

/// Aggregate statistics over one plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanSummary {
    /// Sum of `Total Cost` over every node
    pub total_cost: f64,
    /// Number of nodes in the tree
    pub node_count: usize,
}

/// Walk the plan breadth-first, counting nodes and summing their costs.
///
/// A node without a numeric `Total Cost` fails the whole summary; it is
/// never counted as zero.
pub fn summarize(plan: &PlanTree) -> PlanResult<PlanSummary> {
    let mut summary = PlanSummary {
        total_cost: 0.0,
        node_count: 0,
    };

    for (position, node) in plan.iter().enumerate() {
        let cost = node.total_cost().ok_or_else(|| {
            PlanError::malformed(
                format!("node {} ({})", position, node.node_type()),
                format!("missing numeric {}", TOTAL_COST),
            )
        })?;
        summary.node_count += 1;
        summary.total_cost += cost;
    }

    Ok(summary)
}
