//! Plan narration
//!
//! Nodes are annotated in breadth-first order and the list is then
//! reversed, so the last node visited is narrated first and the root last.
//! For trees with several branches per level this is not a post-order
//! walk; the reversed level order is the intended output.

use crate::annotate::AnnotatorRegistry;
use crate::plan::PlanTree;

/// Narrate every node using `registry`
pub fn narrate_with(plan: &PlanTree, registry: &AnnotatorRegistry) -> Vec<String> {
    let mut sentences: Vec<String> = plan.iter().map(|node| registry.annotate(node)).collect();
    sentences.reverse();
    sentences
}

/// Narrate every node with the built-in templates
pub fn narrate(plan: &PlanTree) -> Vec<String> {
    narrate_with(plan, &AnnotatorRegistry::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{annotate, Emphasis};
    use crate::plan::PlanNode;

    #[test]
    fn test_single_node_matches_annotate() {
        let root = PlanNode::new("Seq Scan")
            .with_attr("Relation Name", "region")
            .with_cost(10.0);
        let expected = annotate(&root);
        let plan = PlanTree::new(root);
        assert_eq!(narrate(&plan), vec![expected]);
    }

    #[test]
    fn test_reversed_level_order() {
        // Level order: A, B, C, D, E  ->  narration: E, D, C, B, A
        let plan = PlanTree::new(
            PlanNode::new("A")
                .with_child(PlanNode::new("B").with_child(PlanNode::new("D")))
                .with_child(PlanNode::new("C").with_child(PlanNode::new("E"))),
        );
        let registry = AnnotatorRegistry::with_emphasis(Emphasis::plain());
        assert_eq!(narrate_with(&plan, &registry), vec!["E", "D", "C", "B", "A"]);
    }

    #[test]
    fn test_not_post_order() {
        // A post-order walk would give D, B, E, C, A
        let plan = PlanTree::new(
            PlanNode::new("A")
                .with_child(PlanNode::new("B").with_child(PlanNode::new("D")))
                .with_child(PlanNode::new("C").with_child(PlanNode::new("E"))),
        );
        assert_ne!(narrate(&plan), vec!["D", "B", "E", "C", "A"]);
    }
}
