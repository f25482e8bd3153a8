//! Natural-language node annotation
//!
//! Turns one plan node into one explanatory sentence, with key terms
//! wrapped in emphasis markers for the renderer. Dispatch is a table keyed
//! by node type; unknown types degrade to their bare name.

mod emphasis;
mod registry;
mod templates;

pub use emphasis::Emphasis;
pub use registry::AnnotatorRegistry;
pub use templates::Template;

use crate::plan::PlanNode;

/// Narrate a single node with the built-in templates and default emphasis.
pub fn annotate(node: &PlanNode) -> String {
    AnnotatorRegistry::new().annotate(node)
}
