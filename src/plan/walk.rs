//! Breadth-first traversal
//!
//! Level by level, left to right within a level. Summaries, narration and
//! knob selection all walk the tree in this order.

use std::collections::VecDeque;

use super::node::PlanNode;

/// Breadth-first iterator over a plan tree
pub struct BreadthFirst<'a> {
    queue: VecDeque<&'a PlanNode>,
}

impl<'a> BreadthFirst<'a> {
    /// Start a walk at `root`
    pub fn new(root: &'a PlanNode) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root);
        Self { queue }
    }
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = &'a PlanNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children().iter());
        Some(node)
    }
}
