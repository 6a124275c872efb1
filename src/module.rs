//! Node modules: the registration unit for graph construction.
//!
//! A [`NodeModule`] is a named collection of node definitions, typically
//! one per domain concern (ingestion, cleaning, metrics). Builders accept
//! whole modules rather than loose nodes so a template pipeline can be
//! completed by swapping one module for another — replacing the module
//! that holds the abstract placeholders with one that holds concrete
//! implementations, without touching the rest of the registration.

use crate::node::NodeDef;

/// A named collection of node definitions.
#[derive(Debug, Clone, Default)]
pub struct NodeModule {
  name: String,
  nodes: Vec<NodeDef>,
}

impl NodeModule {
  /// Creates an empty module with the given name.
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      nodes: Vec::new(),
    }
  }

  /// Adds a node definition to the module.
  #[must_use]
  pub fn with_node(mut self, node: NodeDef) -> Self {
    self.nodes.push(node);
    self
  }

  /// Returns the module's name.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Returns the module's node definitions, in registration order.
  #[must_use]
  pub fn nodes(&self) -> &[NodeDef] {
    &self.nodes
  }
}
