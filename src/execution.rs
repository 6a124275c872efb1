//! # Graph Execution
//!
//! Synchronous, single-threaded evaluation of a constructed graph.
//!
//! Execution walks the nodes needed for the requested outputs in
//! dependency order (sources first), feeding each node's output value to
//! the inputs named after it. Graph-level inputs are satisfied from the
//! configuration bound at construction time and from the call-site input
//! map; call-site values win.
//!
//! Abstract placeholder nodes have no body, so reaching one during
//! execution is an error. Graphs produced by the guarded build path
//! ([`crate::template::AbcBuilder::build`]) contain none, which is the
//! invariant that makes them runnable.

use crate::error::ExecutionError;
use crate::graph::{Graph, RESERVED_NODE_NAME};
use crate::node::NodeInputs;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

impl Graph {
  /// Executes the graph and returns the requested output values.
  ///
  /// # Arguments
  ///
  /// * `requested` - Names of the variables to evaluate; node names and
  ///   graph-level input names are both valid
  /// * `inputs` - Call-site values for graph-level inputs; these override
  ///   configuration bound at construction time
  ///
  /// Only the nodes needed for the requested outputs are evaluated. Each
  /// invocation starts from a fresh value map; nothing is cached between
  /// calls.
  ///
  /// # Errors
  ///
  /// Returns [`ExecutionError`] if a requested name is unknown, a
  /// required graph input was not supplied, an abstract node is reached,
  /// or a node body fails.
  pub fn execute(
    &self,
    requested: &[&str],
    inputs: &BTreeMap<String, Value>,
  ) -> Result<BTreeMap<String, Value>, ExecutionError> {
    // Graph inputs: config bindings overlaid by call-site values.
    let mut values: BTreeMap<String, Value> = self.bound_inputs().clone();
    for (key, value) in inputs {
      values.insert(key.clone(), value.clone());
    }

    for name in requested {
      if self.node(name).is_some() || values.contains_key(*name) {
        continue;
      }
      if self.graph_inputs().iter().any(|i| i.as_str() == *name) {
        return Err(ExecutionError::MissingInput {
          node: RESERVED_NODE_NAME.to_string(),
          input: (*name).to_string(),
        });
      }
      return Err(ExecutionError::UnknownVariable((*name).to_string()));
    }

    // Transitive dependency closure of the requested nodes.
    let mut needed: BTreeSet<&str> = BTreeSet::new();
    let mut stack: Vec<&str> = requested
      .iter()
      .copied()
      .filter(|n| self.node(n).is_some())
      .collect();
    while let Some(name) = stack.pop() {
      if needed.insert(name) {
        let node = self.node(name).expect("needed set holds registered nodes");
        for input in node.inputs() {
          if self.node(input).is_some() {
            stack.push(input);
          }
        }
      }
    }

    for name in self.topo_order() {
      if !needed.contains(name.as_str()) {
        continue;
      }
      let node = self.node(name).expect("topo order holds registered nodes");
      let body = node
        .body()
        .ok_or_else(|| ExecutionError::AbstractNode(name.clone()))?;

      let mut node_inputs = NodeInputs::new();
      for input in node.inputs() {
        let value = values.get(input).ok_or_else(|| ExecutionError::MissingInput {
          node: name.clone(),
          input: input.clone(),
        })?;
        node_inputs.insert(input.clone(), value.clone());
      }

      trace!(node = %name, "executing node");
      let output = body.as_ref()(&node_inputs).map_err(|e| ExecutionError::Body {
        node: name.clone(),
        message: e.to_string(),
      })?;
      values.insert(name.clone(), output);
    }

    let mut results = BTreeMap::new();
    for name in requested {
      let value = values
        .get(*name)
        .expect("requested variables validated and evaluated");
      results.insert((*name).to_string(), value.clone());
    }
    Ok(results)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::graph_builder::GraphBuilder;
  use crate::module::NodeModule;
  use crate::node::NodeDef;
  use serde_json::json;

  fn arithmetic_module() -> NodeModule {
    NodeModule::new("arithmetic")
      .with_node(NodeDef::concrete("doubled", ["base"], "i64", |inputs| {
        let base = inputs["base"].as_i64().unwrap_or(0);
        Ok(json!(base * 2))
      }))
      .with_node(NodeDef::concrete("shifted", ["doubled"], "i64", |inputs| {
        let doubled = inputs["doubled"].as_i64().unwrap_or(0);
        Ok(json!(doubled + 1))
      }))
  }

  fn call_inputs(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
    pairs
      .iter()
      .map(|(k, v)| ((*k).to_string(), v.clone()))
      .collect()
  }

  #[test]
  fn executes_in_dependency_order() {
    let graph = GraphBuilder::new("p")
      .with_module(arithmetic_module())
      .build()
      .unwrap();
    let results = graph
      .execute(&["shifted"], &call_inputs(&[("base", json!(10))]))
      .unwrap();
    assert_eq!(results["shifted"], json!(21));
    assert!(!results.contains_key("doubled"));
  }

  #[test]
  fn config_binds_inputs_and_call_site_wins() {
    let builder = GraphBuilder::new("p")
      .with_module(arithmetic_module())
      .with_config("base", json!(3));
    let graph = builder.build().unwrap();

    let from_config = graph.execute(&["doubled"], &BTreeMap::new()).unwrap();
    assert_eq!(from_config["doubled"], json!(6));

    let overridden = graph
      .execute(&["doubled"], &call_inputs(&[("base", json!(5))]))
      .unwrap();
    assert_eq!(overridden["doubled"], json!(10));
  }

  #[test]
  fn requesting_a_graph_input_returns_its_value() {
    let graph = GraphBuilder::new("p")
      .with_module(arithmetic_module())
      .build()
      .unwrap();
    let results = graph
      .execute(&["base"], &call_inputs(&[("base", json!(7))]))
      .unwrap();
    assert_eq!(results["base"], json!(7));
  }

  #[test]
  fn missing_input_is_reported_with_context() {
    let graph = GraphBuilder::new("p")
      .with_module(arithmetic_module())
      .build()
      .unwrap();
    let err = graph.execute(&["doubled"], &BTreeMap::new()).unwrap_err();
    match err {
      ExecutionError::MissingInput { node, input } => {
        assert_eq!(node, "doubled");
        assert_eq!(input, "base");
      }
      other => panic!("expected missing input, got {other}"),
    }
  }

  #[test]
  fn unknown_variable_rejected() {
    let graph = GraphBuilder::new("p")
      .with_module(arithmetic_module())
      .build()
      .unwrap();
    let err = graph.execute(&["nonsense"], &BTreeMap::new()).unwrap_err();
    assert!(matches!(err, ExecutionError::UnknownVariable(n) if n == "nonsense"));
  }

  #[test]
  fn abstract_node_fails_execution() {
    let graph = GraphBuilder::new("p")
      .with_module(
        NodeModule::new("m")
          .with_node(NodeDef::concrete("raw", Vec::<String>::new(), "json", |_| {
            Ok(json!([1, 2]))
          }))
          .with_node(NodeDef::abstract_node("pre_process", ["raw"], "json")),
      )
      .build()
      .unwrap();
    let err = graph.execute(&["pre_process"], &BTreeMap::new()).unwrap_err();
    assert!(matches!(err, ExecutionError::AbstractNode(n) if n == "pre_process"));
  }

  #[test]
  fn body_errors_carry_node_name() {
    let graph = GraphBuilder::new("p")
      .with_module(NodeModule::new("m").with_node(NodeDef::concrete(
        "flaky",
        Vec::<String>::new(),
        "json",
        |_| Err("boom".into()),
      )))
      .build()
      .unwrap();
    let err = graph.execute(&["flaky"], &BTreeMap::new()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("flaky"));
    assert!(msg.contains("boom"));
  }

  #[test]
  fn unneeded_branches_are_not_evaluated() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let counter = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&counter);
    let graph = GraphBuilder::new("p")
      .with_module(
        NodeModule::new("m")
          .with_node(NodeDef::concrete("wanted", Vec::<String>::new(), "json", |_| {
            Ok(json!(1))
          }))
          .with_node(NodeDef::concrete(
            "unwanted",
            Vec::<String>::new(),
            "json",
            move |_| {
              probe.fetch_add(1, Ordering::SeqCst);
              Ok(json!(2))
            },
          )),
      )
      .build()
      .unwrap();

    graph.execute(&["wanted"], &BTreeMap::new()).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 0);
  }
}
