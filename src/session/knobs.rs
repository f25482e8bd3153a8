//! Planner strategy knobs
//!
//! Each entry maps a plan node type to the boolean planner setting that
//! turns that strategy off. The keys are matched against `Node Type`
//! verbatim; only listed types contribute knobs.

use std::collections::BTreeSet;

use crate::plan::PlanTree;

/// Node type to planner setting, in table order
pub const KNOB_TABLE: &[(&str, &str)] = &[
    ("bitmapscan", "enable_bitmapscan"),
    ("hashagg", "enable_hashagg"),
    ("Hash Join", "enable_hashjoin"),
    ("Index Scan", "enable_indexscan"),
    ("Index Only Scan", "enable_indexonlyscan"),
    ("Materialize", "enable_material"),
    ("Merge Join", "enable_mergejoin"),
    ("Nested Loop", "enable_nestloop"),
    ("Seq Scan", "enable_seqscan"),
    ("Sort", "enable_sort"),
    ("Tid Scan", "enable_tidscan"),
];

/// Planner setting for a node type, if the strategy can be disabled
pub fn knob_for(node_type: &str) -> Option<&'static str> {
    KNOB_TABLE
        .iter()
        .find(|(t, _)| *t == node_type)
        .map(|(_, knob)| *knob)
}

/// Whether `name` is a planner setting this crate may toggle
pub fn is_known_knob(name: &str) -> bool {
    KNOB_TABLE.iter().any(|(_, knob)| *knob == name)
}

/// Distinct node types appearing anywhere in the plan, in walk order
pub fn node_types(plan: &PlanTree) -> Vec<&str> {
    let mut seen = Vec::new();
    for node in plan.iter() {
        if !seen.contains(&node.node_type()) {
            seen.push(node.node_type());
        }
    }
    seen
}

/// Settings that disable every strategy the plan uses
pub fn knobs_for_plan(plan: &PlanTree) -> BTreeSet<&'static str> {
    node_types(plan).into_iter().filter_map(knob_for).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanNode;

    #[test]
    fn test_table_lookups() {
        assert_eq!(knob_for("Seq Scan"), Some("enable_seqscan"));
        assert_eq!(knob_for("Hash Join"), Some("enable_hashjoin"));
        assert_eq!(knob_for("bitmapscan"), Some("enable_bitmapscan"));
        assert_eq!(knob_for("Hash"), None);
        assert_eq!(knob_for("seq scan"), None);
        assert!(is_known_knob("enable_tidscan"));
        assert!(!is_known_knob("enable_partitionwise_join"));
    }

    #[test]
    fn test_knobs_for_plan_are_distinct() {
        let plan = PlanTree::new(
            PlanNode::new("Hash Join")
                .with_child(PlanNode::new("Seq Scan"))
                .with_child(PlanNode::new("Hash").with_child(PlanNode::new("Seq Scan"))),
        );
        assert_eq!(node_types(&plan), vec!["Hash Join", "Seq Scan", "Hash"]);

        let knobs: Vec<_> = knobs_for_plan(&plan).into_iter().collect();
        assert_eq!(knobs, vec!["enable_hashjoin", "enable_seqscan"]);
    }

    #[test]
    fn test_untabled_types_contribute_nothing() {
        let plan = PlanTree::new(PlanNode::new("Result"));
        assert!(knobs_for_plan(&plan).is_empty());
    }
}
