//! Template registry
//!
//! Maps a node type to the template that narrates it. Node types are
//! open-ended: a type with no registered template is narrated as its bare
//! name, and so is a node whose template lacks a required attribute.

use std::collections::HashMap;
use std::fmt;

use super::emphasis::Emphasis;
use super::templates::{self, Template};
use crate::plan::PlanNode;

/// Registry of node-type templates.
#[derive(Clone)]
pub struct AnnotatorRegistry {
    templates: HashMap<String, Template>,
    emphasis: Emphasis,
}

impl AnnotatorRegistry {
    /// Create a registry with every built-in template and default emphasis.
    pub fn new() -> Self {
        Self::with_emphasis(Emphasis::default())
    }

    /// Create a registry with every built-in template.
    pub fn with_emphasis(emphasis: Emphasis) -> Self {
        let mut registry = Self {
            templates: HashMap::new(),
            emphasis,
        };
        registry.register_scans();
        registry.register_joins();
        registry.register_grouping();
        registry.register_plumbing();
        registry
    }

    /// Register (or replace) the template for a node type.
    pub fn register(&mut self, node_type: impl Into<String>, template: Template) {
        self.templates.insert(node_type.into(), template);
    }

    /// Check if a node type has a template.
    pub fn contains(&self, node_type: &str) -> bool {
        self.templates.contains_key(node_type)
    }

    /// Number of registered node types.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Markers used around key terms.
    pub fn emphasis(&self) -> &Emphasis {
        &self.emphasis
    }

    /// Narrate a single node.
    pub fn annotate(&self, node: &PlanNode) -> String {
        self.templates
            .get(node.node_type())
            .and_then(|template| template(node, &self.emphasis))
            .unwrap_or_else(|| node.node_type().to_string())
    }

    fn register_scans(&mut self) {
        self.register("Seq Scan", templates::seq_scan);
        self.register("Index Scan", templates::index_scan);
        self.register("Index Only Scan", templates::index_only_scan);
        self.register("Bitmap Heap Scan", templates::bitmap_heap_scan);
        self.register("Bitmap Index Scan", templates::bitmap_index_scan);
        self.register("CTE Scan", templates::cte_scan);
        self.register("Function Scan", templates::function_scan);
        self.register("Subquery Scan", templates::subquery_scan);
        self.register("Values Scan", templates::values_scan);
    }

    fn register_joins(&mut self) {
        self.register("Nested Loop", templates::nested_loop);
        self.register("Merge Join", templates::merge_join);
        self.register("Hash Join", templates::hash_join);
        self.register("Hash", templates::hash);
    }

    fn register_grouping(&mut self) {
        self.register("Aggregate", templates::aggregate);
        self.register("Group", templates::group);
        self.register("Unique", templates::unique);
        self.register("SetOp", templates::set_op);
        self.register("Sort", templates::sort);
    }

    fn register_plumbing(&mut self) {
        self.register("Append", templates::append);
        self.register("Limit", templates::limit);
        self.register("Materialize", templates::materialize);
        self.register("Memoize", templates::memoize);
        self.register("Gather", templates::gather);
        self.register("Gather Merge", templates::gather_merge);
    }
}

impl fmt::Debug for AnnotatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut node_types: Vec<_> = self.templates.keys().collect();
        node_types.sort();
        f.debug_struct("AnnotatorRegistry")
            .field("node_types", &node_types)
            .field("emphasis", &self.emphasis)
            .finish()
    }
}

impl Default for AnnotatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
