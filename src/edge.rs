//! Dependency edges between pipeline nodes.
//!
//! Edges are not authored directly: graph assembly derives them by
//! matching each node's declared input names against the names of the
//! other registered nodes. An input matched by no node becomes a
//! graph-level input instead of an edge.

use serde::{Deserialize, Serialize};

/// A directed dependency: `source`'s output feeds `target`'s input of the
/// same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
  /// Name of the producing node.
  pub source: String,
  /// Name of the consuming node.
  pub target: String,
}

impl Edge {
  /// Creates a new edge.
  #[must_use]
  pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      target: target.into(),
    }
  }
}
