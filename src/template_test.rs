//! End-to-end tests for the template pipeline lifecycle: author a graph
//! with placeholders, visualize it, then swap in concrete
//! implementations and run it.

use crate::classify;
use crate::module::NodeModule;
use crate::node::NodeDef;
use crate::render::DotRenderer;
use crate::template::AbcBuilder;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// The shared, already-implemented part of the pipeline: fetch raw rows
/// for a configured dataset and expose an interface point downstream
/// domains can rely on.
fn interface_module() -> NodeModule {
  NodeModule::new("interface")
    .with_node(NodeDef::concrete("raw_data", ["dataset"], "rows", |inputs| {
      match inputs["dataset"].as_str() {
        Some("spending_budget") => Ok(json!({ "signups": [1, 10, 50], "spend": [10, 20, 40] })),
        _ => Ok(json!({})),
      }
    }))
    .with_node(NodeDef::concrete(
      "initial_df",
      ["pre_process"],
      "rows",
      |inputs| Ok(inputs["pre_process"].clone()),
    ))
}

/// The not-yet-implemented part: cleaning and metrics vary per business
/// need, so the template only reserves their place in the topology.
fn placeholder_module() -> NodeModule {
  NodeModule::new("placeholders")
    .with_node(NodeDef::abstract_node("pre_process", ["raw_data"], "rows"))
    .with_node(NodeDef::abstract_node("spending_metrics", ["initial_df"], "rows"))
}

/// Concrete replacements for the placeholders.
fn implementation_module() -> NodeModule {
  NodeModule::new("implementations")
    .with_node(NodeDef::concrete(
      "pre_process",
      ["raw_data"],
      "rows",
      |inputs| Ok(inputs["raw_data"].clone()),
    ))
    .with_node(NodeDef::concrete(
      "spending_metrics",
      ["initial_df"],
      "rows",
      |inputs| {
        let spend = inputs["initial_df"]["spend"]
          .as_array()
          .map(|a| a.iter().filter_map(Value::as_i64).sum::<i64>())
          .unwrap_or(0);
        Ok(json!({ "total_spend": spend }))
      },
    ))
}

fn template_builder() -> AbcBuilder {
  AbcBuilder::new("hello_world")
    .with_modules([interface_module(), placeholder_module()])
    .with_config("dataset", json!("spending_budget"))
    .with_renderer(Box::new(DotRenderer::new()))
}

#[test]
fn template_lists_and_rejects_placeholders() {
  let builder = template_builder();

  let err = builder.build().unwrap_err();
  let msg = err.to_string();
  assert!(msg.contains("pre_process"));
  assert!(msg.contains("spending_metrics"));

  // Every placeholder appears exactly once in the message.
  assert_eq!(msg.matches("pre_process").count(), 1);
  assert_eq!(msg.matches("spending_metrics").count(), 1);
}

#[test]
fn template_visualizes_with_placeholders_distinguished() {
  let rendered = template_builder()
    .visualize()
    .unwrap()
    .expect("renderer supplied");
  let dot = rendered.source();

  assert_eq!(rendered.format(), "dot");
  assert!(dot.contains("ABC Node"));
  assert!(dot.contains("fillcolor=\"blue\""));
  assert!(dot.contains("fillcolor=\"orange\""));
  assert!(dot.contains("raw_data -> pre_process;"));
  assert!(dot.contains("initial_df -> spending_metrics;"));
  assert!(dot.contains("dataset -> raw_data;"));
}

#[test]
fn completed_pipeline_builds_and_runs() {
  let builder = AbcBuilder::new("hello_world")
    .with_modules([interface_module(), implementation_module()])
    .with_config("dataset", json!("spending_budget"));

  let graph = builder.build().unwrap();
  assert!(classify::abstract_nodes(&graph).is_empty());

  let results = graph
    .execute(&["spending_metrics"], &BTreeMap::new())
    .unwrap();
  assert_eq!(results["spending_metrics"], json!({ "total_spend": 70 }));
}

#[test]
fn classification_matches_tag_query() {
  // The enum-backed classifier and the open-ended tag query agree on
  // which nodes are abstract. The unguarded base builder hands out the
  // candidate graph the template builder would reject.
  let graph = crate::graph_builder::GraphBuilder::new("hello_world")
    .with_modules([interface_module(), placeholder_module()])
    .build()
    .unwrap();

  let mut filter = BTreeMap::new();
  filter.insert("node_type".to_string(), "abstract".to_string());
  assert_eq!(
    classify::abstract_nodes(&graph),
    graph.list_available_variables(Some(&filter))
  );
}
