//! Execution plan model
//!
//! An owned, immutable tree built from one planner EXPLAIN document.
//! Node types are open-ended strings; attributes keep the planner's order.

mod errors;
mod node;
mod parser;
mod walk;

pub use errors::{PlanError, PlanResult};
pub use node::{AttrValue, PlanNode, PlanTree, NODE_TYPE, PLANS, TOTAL_COST};
pub use walk::BreadthFirst;
