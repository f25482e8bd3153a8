//! Validating parser for planner EXPLAIN (FORMAT JSON) output
//!
//! Accepted shapes:
//! - the result array: `[{"Plan": {...}, "Settings": {...}}]`
//! - a wrapper object: `{"Plan": {...}}`
//! - a bare node: `{"Node Type": ..., ...}`
//!
//! Every node must carry a string `Node Type` and a numeric `Total Cost`.
//! Malformed documents are rejected here, before any analysis sees them.

use serde_json::{Map, Value};

use super::errors::{PlanError, PlanResult};
use super::node::{AttrValue, PlanNode, PlanTree, NODE_TYPE, PLANS, TOTAL_COST};

const PLAN_KEY: &str = "Plan";

impl PlanTree {
    /// Build a plan tree from a parsed EXPLAIN document
    pub fn from_explain_json(document: &Value) -> PlanResult<Self> {
        let root = locate_root(document)?;
        let node = parse_node(root, PLAN_KEY)?;
        Ok(PlanTree::new(node))
    }

    /// Build a plan tree from raw EXPLAIN text
    pub fn from_explain_str(text: &str) -> PlanResult<Self> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_explain_json(&document)
    }
}

fn locate_root(document: &Value) -> PlanResult<&Value> {
    match document {
        Value::Array(items) => {
            let first = items.first().ok_or(PlanError::EmptyDocument)?;
            locate_root(first)
        }
        Value::Object(map) => match map.get(PLAN_KEY) {
            Some(plan) => Ok(plan),
            None if map.contains_key(NODE_TYPE) => Ok(document),
            None => Err(PlanError::EmptyDocument),
        },
        _ => Err(PlanError::malformed(
            PLAN_KEY,
            "expected an object or an array of objects",
        )),
    }
}

fn parse_node(value: &Value, path: &str) -> PlanResult<PlanNode> {
    let map = value
        .as_object()
        .ok_or_else(|| PlanError::malformed(path, "node is not an object"))?;

    let node_type = match map.get(NODE_TYPE) {
        Some(Value::String(t)) => t.clone(),
        Some(_) => return Err(PlanError::malformed(path, "Node Type is not a string")),
        None => return Err(PlanError::malformed(path, "missing Node Type")),
    };

    match map.get(TOTAL_COST) {
        Some(v) if v.is_number() => {}
        Some(_) => return Err(PlanError::malformed(path, "Total Cost is not numeric")),
        None => return Err(PlanError::malformed(path, "missing Total Cost")),
    }

    let mut node = PlanNode::new(node_type);
    copy_attributes(&mut node, map);

    if let Some(plans) = map.get(PLANS) {
        let children = plans
            .as_array()
            .ok_or_else(|| PlanError::malformed(path, "Plans is not an array"))?;
        for (i, child) in children.iter().enumerate() {
            let child_path = format!("{}.{}[{}]", path, PLANS, i);
            node.push_child(parse_node(child, &child_path)?);
        }
    }

    Ok(node)
}

fn copy_attributes(node: &mut PlanNode, map: &Map<String, Value>) {
    for (key, value) in map {
        if key == PLANS {
            continue;
        }
        node.set_attr(key.as_str(), AttrValue::from(value));
    }
}
