//! # GraphBuilder
//!
//! Builder pattern for constructing graphs with a fluent API.
//!
//! The `GraphBuilder` is the base construction mechanism: it accumulates
//! node modules and configuration, then assembles an immutable
//! [`Graph`](crate::graph::Graph) on demand. It performs structural
//! validation only — it does not care whether nodes are abstract. The
//! template layer ([`crate::template::AbcBuilder`]) wraps this builder to
//! add the abstract-node guard.

use crate::error::GraphBuildError;
use crate::graph::Graph;
use crate::module::NodeModule;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Builder for constructing graphs with a fluent API.
///
/// Registration accumulates node modules and configuration; `build()`
/// assembles a fresh graph from the currently registered set. Building
/// borrows the builder, so the same registration can produce any number
/// of independent graph instances.
///
/// # Example
///
/// ```rust
/// use dagweave::graph_builder::GraphBuilder;
/// use dagweave::module::NodeModule;
/// use dagweave::node::NodeDef;
/// use serde_json::json;
///
/// let module = NodeModule::new("ingest")
///   .with_node(NodeDef::concrete("raw", Vec::<String>::new(), "json", |_| Ok(json!([1, 2]))));
///
/// let graph = GraphBuilder::new("my_pipeline")
///   .with_module(module)
///   .build()?;
/// assert_eq!(graph.nodes().len(), 1);
/// # Ok::<(), dagweave::error::GraphBuildError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
  name: String,
  modules: Vec<NodeModule>,
  config: BTreeMap<String, Value>,
}

impl GraphBuilder {
  /// Creates a new `GraphBuilder` for a graph with the given name.
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      modules: Vec::new(),
      config: BTreeMap::new(),
    }
  }

  /// Registers a single node module.
  ///
  /// Modules contribute their nodes in registration order; that order is
  /// the graph's natural node enumeration order.
  #[must_use]
  pub fn with_module(mut self, module: NodeModule) -> Self {
    self.modules.push(module);
    self
  }

  /// Registers several node modules at once.
  #[must_use]
  pub fn with_modules(mut self, modules: impl IntoIterator<Item = NodeModule>) -> Self {
    self.modules.extend(modules);
    self
  }

  /// Binds a configuration value.
  ///
  /// Config keys pre-bind graph-level inputs of the same name, so
  /// execution does not require them at the call site. A key naming a
  /// registered node is rejected at build time.
  #[must_use]
  pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
    self.config.insert(key.into(), value);
    self
  }

  /// Returns the registered modules.
  #[must_use]
  pub fn modules(&self) -> &[NodeModule] {
    &self.modules
  }

  /// Assembles a graph from the currently registered modules and config.
  ///
  /// Each invocation constructs its own independent graph instance; no
  /// state is cached or shared between calls.
  ///
  /// # Errors
  ///
  /// Returns [`GraphBuildError`] if the definition set is malformed; see
  /// [`Graph`] assembly for the individual conditions.
  pub fn build(&self) -> Result<Graph, GraphBuildError> {
    let nodes = self
      .modules
      .iter()
      .flat_map(|m| m.nodes().iter().cloned())
      .collect::<Vec<_>>();
    debug!(
      graph = %self.name,
      modules = self.modules.len(),
      nodes = nodes.len(),
      "building graph"
    );
    Graph::assemble(self.name.clone(), nodes, self.config.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::NodeDef;
  use serde_json::json;

  fn ingest_module() -> NodeModule {
    NodeModule::new("ingest")
      .with_node(NodeDef::concrete(
        "raw",
        ["source_table"],
        "json",
        |inputs| Ok(inputs["source_table"].clone()),
      ))
      .with_node(NodeDef::concrete("clean", ["raw"], "json", |inputs| {
        Ok(inputs["raw"].clone())
      }))
  }

  #[test]
  fn build_flattens_modules_in_order() {
    let graph = GraphBuilder::new("p")
      .with_module(ingest_module())
      .with_module(
        NodeModule::new("metrics")
          .with_node(NodeDef::abstract_node("spend_metrics", ["clean"], "json")),
      )
      .build()
      .unwrap();

    let names: Vec<&str> = graph.nodes().iter().map(|n| n.name()).collect();
    assert_eq!(names, ["raw", "clean", "spend_metrics"]);
  }

  #[test]
  fn build_is_repeatable() {
    let builder = GraphBuilder::new("p").with_module(ingest_module());
    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_eq!(
      first.list_available_variables(None),
      second.list_available_variables(None)
    );
  }

  #[test]
  fn config_binds_graph_inputs() {
    let graph = GraphBuilder::new("p")
      .with_module(ingest_module())
      .with_config("source_table", json!("events"))
      .build()
      .unwrap();
    assert_eq!(graph.graph_inputs(), ["source_table".to_string()]);
    assert_eq!(graph.bound_inputs()["source_table"], json!("events"));
  }

  #[test]
  fn config_shadowing_node_fails() {
    let err = GraphBuilder::new("p")
      .with_module(ingest_module())
      .with_config("raw", json!(1))
      .build()
      .unwrap_err();
    assert!(matches!(err, GraphBuildError::ConfigShadowsNode(k) if k == "raw"));
  }
}
