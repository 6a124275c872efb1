//! Template pipeline walkthrough.
//!
//! Builds a pipeline whose cleaning and metrics stages are abstract
//! placeholders, renders it with the placeholders highlighted, then
//! swaps in concrete implementations and runs the completed graph.
//!
//! ```sh
//! cargo run --example template_pipeline
//! ```

use dagweave::module::NodeModule;
use dagweave::node::NodeDef;
use dagweave::render::DotRenderer;
use dagweave::template::AbcBuilder;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::error::Error;

/// Nodes every variant of the pipeline shares: resolve a query for the
/// configured dataset, fetch its rows, and expose an interface point the
/// downstream domain can rely on.
fn shared_module() -> NodeModule {
  NodeModule::new("shared")
    .with_node(NodeDef::concrete(
      "sql_query",
      ["my_data"],
      "str",
      |inputs| match inputs["my_data"].as_str() {
        Some("spending_budget") => Ok(json!("select * from my_database")),
        _ => Ok(json!("select * from some_other_data")),
      },
    ))
    .with_node(NodeDef::concrete(
      "raw_data",
      ["sql_query"],
      "rows",
      |inputs| {
        if inputs["sql_query"] == json!("select * from my_database") {
          Ok(json!({ "signups": [1, 10, 50, 200, 400], "spend": [10, 10, 20, 40, 50] }))
        } else {
          Ok(json!({ "other_data_foo": [0, 0, 0] }))
        }
      },
    ))
    .with_node(NodeDef::concrete(
      "initial_df",
      ["pre_process"],
      "rows",
      |inputs| Ok(inputs["pre_process"].clone()),
    ))
}

/// The template's placeholders: cleaning and metrics vary per business
/// need, so only their position in the topology is reserved.
fn placeholder_module() -> NodeModule {
  NodeModule::new("placeholders")
    .with_node(NodeDef::abstract_node("pre_process", ["raw_data"], "rows"))
    .with_node(NodeDef::abstract_node("spending_metrics", ["initial_df"], "rows"))
    .with_node(NodeDef::abstract_node("signup_metrics", ["initial_df"], "rows"))
}

/// One business domain's concrete replacements for the placeholders.
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
        let total: i64 = sum_column(&inputs["initial_df"], "spend");
        Ok(json!({ "total_spend": total }))
      },
    ))
    .with_node(NodeDef::concrete(
      "signup_metrics",
      ["initial_df"],
      "rows",
      |inputs| {
        let total: i64 = sum_column(&inputs["initial_df"], "signups");
        Ok(json!({ "total_signups": total }))
      },
    ))
}

fn sum_column(rows: &Value, column: &str) -> i64 {
  rows[column]
    .as_array()
    .map(|a| a.iter().filter_map(Value::as_i64).sum())
    .unwrap_or(0)
}

fn main() -> Result<(), Box<dyn Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  // Design time: the template with placeholders.
  let template = AbcBuilder::new("hello_world")
    .with_modules([shared_module(), placeholder_module()])
    .with_config("my_data", json!("spending_budget"))
    .with_renderer(Box::new(DotRenderer::new()));

  if let Some(rendered) = template.visualize()? {
    println!("--- template rendering ({}) ---", rendered.format());
    println!("{}", rendered.source());
  }

  match template.build() {
    Ok(_) => unreachable!("the template still has placeholders"),
    Err(err) => println!("build refused: {err}"),
  }

  // Implementation time: placeholders replaced, the guard passes.
  let completed = AbcBuilder::new("hello_world")
    .with_modules([shared_module(), implementation_module()])
    .with_config("my_data", json!("spending_budget"));

  let graph = completed.build()?;
  let results = graph.execute(&["spending_metrics", "signup_metrics"], &BTreeMap::new())?;
  println!("spending metrics: {}", results["spending_metrics"]);
  println!("signup metrics:   {}", results["signup_metrics"]);

  Ok(())
}
