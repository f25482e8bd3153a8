//! Plan tree model
//!
//! A `PlanNode` owns its children outright; there is no sharing and no
//! back edge, so a `PlanTree` is a strict rooted tree. Attribute order is
//! the order the planner emitted them in, which the signature depends on.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};

/// Attribute key carrying the node's strategy name
pub const NODE_TYPE: &str = "Node Type";
/// Attribute key carrying the node's estimated total cost
pub const TOTAL_COST: &str = "Total Cost";
/// Document key holding a node's sub-plans
pub const PLANS: &str = "Plans";

/// A single planner-supplied attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Free text (conditions, names, strategies)
    Text(String),
    /// Numeric estimate (costs, row counts, widths), exactly as emitted
    Number(Number),
    /// Flag (e.g. `Parallel Aware`)
    Bool(bool),
    /// Ordered list of strings (e.g. `Group Key`, `Output`)
    List(Vec<String>),
    /// Anything else, kept verbatim
    Nested(Value),
}

impl AttrValue {
    /// Borrow the text value, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Borrow the list value, if this is a list of strings
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert back to the planner's JSON representation
    pub fn to_json(&self) -> Value {
        match self {
            AttrValue::Text(s) => Value::String(s.clone()),
            AttrValue::Number(n) => Value::Number(n.clone()),
            AttrValue::Bool(b) => Value::Bool(*b),
            AttrValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            AttrValue::Nested(v) => v.clone(),
        }
    }
}

impl From<&Value> for AttrValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => AttrValue::Text(s.clone()),
            Value::Bool(b) => AttrValue::Bool(*b),
            Value::Number(n) => AttrValue::Number(n.clone()),
            Value::Array(items) if items.iter().all(Value::is_string) => AttrValue::List(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            other => AttrValue::Nested(other.clone()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<f64> for AttrValue {
    /// Non-finite values have no JSON form and become `null`
    fn from(n: f64) -> Self {
        match Number::from_f64(n) {
            Some(n) => AttrValue::Number(n),
            None => AttrValue::Nested(Value::Null),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(items: Vec<&str>) -> Self {
        AttrValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// One node of an execution plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanNode {
    node_type: String,
    attributes: Vec<(String, AttrValue)>,
    children: Vec<PlanNode>,
}

impl PlanNode {
    /// Create a node of the given type.
    ///
    /// `Node Type` is recorded as the first attribute so it takes part in
    /// the node's signature like any other text attribute.
    pub fn new(node_type: impl Into<String>) -> Self {
        let node_type = node_type.into();
        Self {
            attributes: vec![(NODE_TYPE.to_string(), AttrValue::Text(node_type.clone()))],
            node_type,
            children: Vec::new(),
        }
    }

    /// Builder: append an attribute (replacing an existing key in place)
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder: append a child plan
    pub fn with_child(mut self, child: PlanNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: set the estimated total cost
    pub fn with_cost(self, total_cost: f64) -> Self {
        self.with_attr(TOTAL_COST, total_cost)
    }

    pub(crate) fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        if key == NODE_TYPE {
            if let AttrValue::Text(t) = &value {
                self.node_type = t.clone();
            }
        }
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub(crate) fn push_child(&mut self, child: PlanNode) {
        self.children.push(child);
    }

    /// The execution strategy (`Node Type`)
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// All attributes, in planner order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up an attribute by key
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Text attribute by key
    pub fn text(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(AttrValue::as_text)
    }

    /// Numeric attribute by key
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attr(key).and_then(AttrValue::as_number)
    }

    /// String-list attribute by key
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.attr(key).and_then(AttrValue::as_list)
    }

    /// Whether the attribute is present at all
    pub fn has(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// `Total Cost`, if present and numeric
    pub fn total_cost(&self) -> Option<f64> {
        self.number(TOTAL_COST)
    }

    /// Sub-plans in planner order
    pub fn children(&self) -> &[PlanNode] {
        &self.children
    }

    /// True when the node has no sub-plans
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl Serialize for PlanNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(!self.children.is_empty());
        let mut map = serializer.serialize_map(Some(self.attributes.len() + extra))?;
        for (key, value) in &self.attributes {
            map.serialize_entry(key, &value.to_json())?;
        }
        if !self.children.is_empty() {
            map.serialize_entry(PLANS, &self.children)?;
        }
        map.end()
    }
}

/// A complete execution plan, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTree {
    root: PlanNode,
}

impl PlanTree {
    /// Wrap a root node
    pub fn new(root: PlanNode) -> Self {
        Self { root }
    }

    /// The root node
    pub fn root(&self) -> &PlanNode {
        &self.root
    }

    /// Breadth-first iterator over every node
    pub fn iter(&self) -> super::walk::BreadthFirst<'_> {
        super::walk::BreadthFirst::new(&self.root)
    }
}

impl From<PlanNode> for PlanTree {
    fn from(root: PlanNode) -> Self {
        Self::new(root)
    }
}

impl Serialize for PlanTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
