//! Structural plan signatures
//!
//! A node's signature text is every string-valued attribute, in attribute
//! order, joined by single spaces. Children contribute their own
//! signatures in order. Numbers, flags and key lists are left out, so two
//! plans with the same shape but different estimates compare equal.

use std::fmt;

use crate::plan::{AttrValue, PlanNode, PlanTree};

/// Canonical, order-preserving fingerprint of a plan's strategy shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanSignature {
    text: String,
    children: Vec<PlanSignature>,
}

impl PlanSignature {
    fn of(node: &PlanNode) -> Self {
        let text = node
            .attributes()
            .filter_map(|(_, value)| match value {
                AttrValue::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            text,
            children: node.children().iter().map(PlanSignature::of).collect(),
        }
    }

    /// The node's own string attributes, space-joined
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Signatures of the node's children
    pub fn children(&self) -> &[PlanSignature] {
        &self.children
    }
}

impl fmt::Display for PlanSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)?;
        if !self.children.is_empty() {
            write!(f, " children[")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", child)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Signature of a whole plan
pub fn signature(plan: &PlanTree) -> PlanSignature {
    PlanSignature::of(plan.root())
}

/// Two plans are equivalent iff their signatures are equal
pub fn equivalent(a: &PlanTree, b: &PlanTree) -> bool {
    signature(a) == signature(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(relation: &str, cost: f64) -> PlanNode {
        PlanNode::new("Seq Scan")
            .with_attr("Relation Name", relation)
            .with_attr("Alias", relation)
            .with_cost(cost)
            .with_attr("Plan Rows", cost * 10.0)
    }

    fn join(cond: &str, cost: f64, left: f64, right: f64) -> PlanTree {
        PlanTree::new(
            PlanNode::new("Hash Join")
                .with_attr("Join Type", "Inner")
                .with_cost(cost)
                .with_attr("Hash Cond", cond)
                .with_child(scan("a", left))
                .with_child(scan("b", right)),
        )
    }

    #[test]
    fn test_text_joins_strings_in_order() {
        let sig = signature(&PlanTree::new(scan("region", 1.0)));
        assert_eq!(sig.text(), "Seq Scan region region");
        assert!(sig.children().is_empty());
    }

    #[test]
    fn test_reflexive_and_symmetric() {
        let a = join("(a.id = b.id)", 50.0, 10.0, 10.0);
        let b = join("(a.id = b.id)", 80.0, 30.0, 5.0);
        assert!(equivalent(&a, &a));
        assert_eq!(equivalent(&a, &b), equivalent(&b, &a));
    }

    #[test]
    fn test_numeric_differences_ignored() {
        let a = join("(a.id = b.id)", 50.0, 10.0, 10.0);
        let b = join("(a.id = b.id)", 80.0, 30.0, 5.0);
        assert!(equivalent(&a, &b));
    }

    #[test]
    fn test_string_differences_detected() {
        let a = join("(a.id = b.id)", 50.0, 10.0, 10.0);
        let b = join("(a.id = b.other_id)", 50.0, 10.0, 10.0);
        assert!(!equivalent(&a, &b));
    }

    #[test]
    fn test_child_order_matters() {
        let a = PlanTree::new(
            PlanNode::new("Nested Loop")
                .with_child(scan("a", 1.0))
                .with_child(scan("b", 1.0)),
        );
        let b = PlanTree::new(
            PlanNode::new("Nested Loop")
                .with_child(scan("b", 1.0))
                .with_child(scan("a", 1.0)),
        );
        assert!(!equivalent(&a, &b));
    }

    #[test]
    fn test_shape_matters() {
        // Same strings overall, different nesting
        let flat = PlanTree::new(
            PlanNode::new("Append")
                .with_child(PlanNode::new("Sort"))
                .with_child(PlanNode::new("Seq Scan")),
        );
        let nested = PlanTree::new(
            PlanNode::new("Append")
                .with_child(PlanNode::new("Sort").with_child(PlanNode::new("Seq Scan"))),
        );
        assert!(!equivalent(&flat, &nested));
    }

    #[test]
    fn test_display() {
        let sig = signature(&join("c", 1.0, 1.0, 1.0));
        let shown = sig.to_string();
        assert!(shown.starts_with("\"Hash Join Inner c\" children["));
    }
}
