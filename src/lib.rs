//! # DagWeave
//!
//! Template-first DAG pipelines in pure Rust.
//!
//! DagWeave lets pipeline authors design and visualize a DAG topology
//! before all business-specific logic exists. Nodes can be registered as
//! abstract placeholders; the graph renders with placeholders visually
//! distinguished, and the validating builder guarantees that no abstract
//! node can ever be part of a runnable graph.
//!
//! ## Key Pieces
//!
//! - **Node definitions and modules**: computation units grouped into
//!   named modules, with dependencies derived from input-name matching
//! - **Base builder**: assembles an immutable, acyclic graph from
//!   modules and configuration
//! - **Template builder**: wraps the base builder with the abstract-node
//!   guard on `build()` and style-driven rendering on `visualize()`
//! - **Synchronous executor**: evaluates requested outputs in dependency
//!   order
//!
//! ## Quick Start
//!
//! ```rust
//! use dagweave::module::NodeModule;
//! use dagweave::node::NodeDef;
//! use dagweave::template::AbcBuilder;
//! use serde_json::json;
//!
//! let module = NodeModule::new("ingest")
//!   .with_node(NodeDef::concrete("raw_data", Vec::<String>::new(), "json", |_| {
//!     Ok(json!([1, 2, 3]))
//!   }))
//!   .with_node(NodeDef::abstract_node("pre_process", ["raw_data"], "json"));
//!
//! let builder = AbcBuilder::new("my_pipeline").with_module(module);
//! // The placeholder keeps the graph from becoming runnable.
//! assert!(builder.build().is_err());
//! ```

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Node classification over constructed graphs.
pub mod classify;
/// Dependency edges between pipeline nodes.
pub mod edge;
/// Error types for construction, classification, and execution.
pub mod error;
/// Synchronous graph execution.
pub mod execution;
/// Immutable pipeline graphs.
pub mod graph;
/// Base graph builder with a fluent registration API.
pub mod graph_builder;
/// Node modules: the registration unit for graph construction.
pub mod module;
/// Node definitions and bodies.
pub mod node;
/// Graph rendering capability and the DOT renderer.
pub mod render;
/// Node styling for rendered graphs.
pub mod style;
/// Node tags and the abstract/concrete classification.
pub mod tags;
/// Validating builder for template pipelines.
pub mod template;

#[cfg(test)]
mod template_test;
