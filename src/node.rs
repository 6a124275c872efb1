//! # Node Definitions
//!
//! This module defines [`NodeDef`], the authoring-time description of one
//! unit of computation in a pipeline graph.
//!
//! ## Structure
//!
//! A node definition carries:
//!
//! - a unique **name**, which is also the variable other nodes reference
//!   to depend on it (edges are derived from input-name matching),
//! - declared **input names** and a declared **output type name**,
//! - a **tag map** for open-ended metadata queries,
//! - a [`NodeKind`] classification attached at construction time,
//! - an optional **body** — the executable closure. Concrete nodes have
//!   one; abstract placeholders never do.
//!
//! ## Concrete vs. abstract
//!
//! [`NodeDef::concrete`] and [`NodeDef::abstract_node`] keep the tag map
//! and the kind enum in sync. Tagging a node `node_type=abstract` through
//! [`NodeDef::with_tag`] flips the kind as well; graph assembly rejects
//! definitions whose kind and body disagree.
//!
//! ## Example
//!
//! ```rust
//! use dagweave::node::NodeDef;
//!
//! // A concrete transform depending on the node named "raw_data".
//! let clean = NodeDef::concrete("clean_data", ["raw_data"], "json", |inputs| {
//!   Ok(inputs["raw_data"].clone())
//! });
//!
//! // A placeholder for business-specific logic, to be implemented later.
//! let metrics = NodeDef::abstract_node("spending_metrics", ["clean_data"], "json");
//! assert!(metrics.kind().is_abstract());
//! ```

use crate::tags::{ABSTRACT_VALUE, NODE_TYPE_KEY, NodeKind, TagMap};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Error type for node body execution.
pub type NodeExecutionError = Box<dyn std::error::Error + Send + Sync>;

/// Input values handed to a node body, keyed by declared input name.
pub type NodeInputs = BTreeMap<String, Value>;

/// Executable body of a concrete node.
///
/// Receives the node's resolved input values and produces the node's
/// output value. Shared via `Arc` so definitions stay cheap to clone when
/// a builder assembles a fresh graph per invocation.
pub type NodeBody = Arc<dyn Fn(&NodeInputs) -> Result<Value, NodeExecutionError> + Send + Sync>;

/// Authoring-time definition of one computation node.
///
/// Definitions are immutable once a graph is assembled from them; the
/// fluent `with_*` methods are for authoring only.
#[derive(Clone)]
pub struct NodeDef {
  name: String,
  inputs: Vec<String>,
  output_type: String,
  tags: TagMap,
  kind: NodeKind,
  body: Option<NodeBody>,
}

impl NodeDef {
  /// Creates a concrete node definition with an executable body.
  ///
  /// # Arguments
  ///
  /// * `name` - Unique node name; other nodes depend on it by this name
  /// * `inputs` - Declared input names, in order
  /// * `output_type` - Declared output type name (display metadata)
  /// * `body` - The node's computation over its resolved inputs
  #[must_use]
  pub fn concrete<N, I, S, F>(name: N, inputs: I, output_type: &str, body: F) -> Self
  where
    N: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&NodeInputs) -> Result<Value, NodeExecutionError> + Send + Sync + 'static,
  {
    Self {
      name: name.into(),
      inputs: inputs.into_iter().map(Into::into).collect(),
      output_type: output_type.to_string(),
      tags: TagMap::new(),
      kind: NodeKind::Concrete,
      body: Some(Arc::new(body)),
    }
  }

  /// Creates an abstract placeholder definition.
  ///
  /// The reserved `node_type=abstract` tag is attached so the definition
  /// is visible to tag queries as well as to the kind classifier.
  #[must_use]
  pub fn abstract_node<N, I, S>(name: N, inputs: I, output_type: &str) -> Self
  where
    N: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut tags = TagMap::new();
    tags.insert(NODE_TYPE_KEY.to_string(), ABSTRACT_VALUE.to_string());
    Self {
      name: name.into(),
      inputs: inputs.into_iter().map(Into::into).collect(),
      output_type: output_type.to_string(),
      tags,
      kind: NodeKind::Abstract,
      body: None,
    }
  }

  /// Attaches a tag to the definition.
  ///
  /// Setting the reserved `node_type` key updates the node's kind to
  /// match, keeping the tag map and the enum consistent. Graph assembly
  /// later verifies that kind and body still agree.
  #[must_use]
  pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    let key = key.into();
    let value = value.into();
    self.tags.insert(key.clone(), value);
    if key == NODE_TYPE_KEY {
      self.kind = NodeKind::from_tags(&self.tags);
    }
    self
  }

  /// Returns the node's name.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Returns the declared input names, in declaration order.
  #[must_use]
  pub fn inputs(&self) -> &[String] {
    &self.inputs
  }

  /// Returns the declared output type name.
  #[must_use]
  pub fn output_type(&self) -> &str {
    &self.output_type
  }

  /// Returns the node's tag map.
  #[must_use]
  pub fn tags(&self) -> &TagMap {
    &self.tags
  }

  /// Returns the node's classification.
  #[must_use]
  pub fn kind(&self) -> NodeKind {
    self.kind
  }

  /// Returns the node's body, if it has one.
  #[must_use]
  pub fn body(&self) -> Option<&NodeBody> {
    self.body.as_ref()
  }
}

impl fmt::Debug for NodeDef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NodeDef")
      .field("name", &self.name)
      .field("inputs", &self.inputs)
      .field("output_type", &self.output_type)
      .field("tags", &self.tags)
      .field("kind", &self.kind)
      .field("body", &self.body.as_ref().map(|_| "<fn>"))
      .finish()
  }
}
