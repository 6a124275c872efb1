//! # Template Builder
//!
//! This module defines [`AbcBuilder`], the validating builder for
//! template pipelines.
//!
//! A template pipeline is a graph mixing concrete nodes with abstract
//! placeholders: the topology is designed and reviewable before all
//! business-specific logic exists. `AbcBuilder` wraps the base
//! [`GraphBuilder`] (composition, not inheritance) and adds exactly two
//! behaviors on top of the same registration surface:
//!
//! - **build guard**: [`AbcBuilder::build`] refuses to release a graph
//!   that still contains abstract nodes, so no placeholder can ever
//!   reach execution;
//! - **template rendering**: [`AbcBuilder::visualize`] draws the graph —
//!   abstract nodes included — with placeholders visually distinguished.
//!
//! ## Example
//!
//! ```rust
//! use dagweave::module::NodeModule;
//! use dagweave::node::NodeDef;
//! use dagweave::render::DotRenderer;
//! use dagweave::template::AbcBuilder;
//! use serde_json::json;
//!
//! let template = NodeModule::new("template")
//!   .with_node(NodeDef::concrete("raw_data", Vec::<String>::new(), "json", |_| {
//!     Ok(json!([1, 2, 3]))
//!   }))
//!   .with_node(NodeDef::abstract_node("pre_process", ["raw_data"], "json"));
//!
//! let builder = AbcBuilder::new("my_pipeline")
//!   .with_module(template)
//!   .with_renderer(Box::new(DotRenderer::new()));
//!
//! // The placeholder renders fine...
//! assert!(builder.visualize()?.is_some());
//! // ...but cannot become a runnable graph.
//! assert!(builder.build().is_err());
//! # Ok::<(), dagweave::error::GraphBuildError>(())
//! ```

use crate::classify;
use crate::error::{AbcBuildError, ClassificationError, GraphBuildError};
use crate::graph::Graph;
use crate::graph_builder::GraphBuilder;
use crate::module::NodeModule;
use crate::render::{GraphRenderer, RenderedGraph};
use crate::style::template_style;
use serde_json::Value;
use tracing::debug;

/// Validating builder for template pipelines.
///
/// Wraps the base [`GraphBuilder`] and layers the abstract-node guard on
/// the build path. The rendering capability is injected at construction;
/// when absent, [`AbcBuilder::visualize`] returns `None` instead of
/// failing — visualization is a convenience, not a correctness-critical
/// path.
pub struct AbcBuilder {
  inner: GraphBuilder,
  renderer: Option<Box<dyn GraphRenderer>>,
}

impl AbcBuilder {
  /// Creates a new template builder for a graph with the given name.
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      inner: GraphBuilder::new(name),
      renderer: None,
    }
  }

  /// Registers a single node module. Forwards to the base builder.
  #[must_use]
  pub fn with_module(mut self, module: NodeModule) -> Self {
    self.inner = self.inner.with_module(module);
    self
  }

  /// Registers several node modules at once. Forwards to the base
  /// builder.
  #[must_use]
  pub fn with_modules(mut self, modules: impl IntoIterator<Item = NodeModule>) -> Self {
    self.inner = self.inner.with_modules(modules);
    self
  }

  /// Binds a configuration value. Forwards to the base builder.
  #[must_use]
  pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
    self.inner = self.inner.with_config(key, value);
    self
  }

  /// Injects the rendering capability used by [`AbcBuilder::visualize`].
  #[must_use]
  pub fn with_renderer(mut self, renderer: Box<dyn GraphRenderer>) -> Self {
    self.renderer = Some(renderer);
    self
  }

  /// Returns all nodes of the graph that are tagged abstract.
  ///
  /// Delegates to the classifier; order is the graph's natural node
  /// enumeration order.
  #[must_use]
  pub fn list_abstract_nodes(graph: &Graph) -> Vec<String> {
    classify::abstract_nodes(graph)
  }

  /// Builds a runnable graph, enforcing the abstract-node guard.
  ///
  /// Invokes the base construction step, then classifies the candidate.
  /// A candidate containing abstract nodes is rejected with a
  /// [`ClassificationError`] naming every placeholder; the caller adds
  /// concrete implementations and retries. A clean candidate is returned
  /// unchanged, guaranteed abstract-node-free and ready for execution.
  ///
  /// # Errors
  ///
  /// Returns [`AbcBuildError`] when base construction fails or when the
  /// candidate graph still contains abstract nodes.
  pub fn build(&self) -> Result<Graph, AbcBuildError> {
    let candidate = self.inner.build()?;
    let abstract_nodes = Self::list_abstract_nodes(&candidate);
    if !abstract_nodes.is_empty() {
      debug!(
        graph = %candidate.name(),
        count = abstract_nodes.len(),
        "rejecting candidate graph with abstract nodes"
      );
      return Err(ClassificationError {
        nodes: abstract_nodes,
      }
      .into());
    }
    Ok(candidate)
  }

  /// Renders the template graph, abstract nodes included.
  ///
  /// Invokes the base construction step without the abstract-node guard
  /// — visualization exists precisely to show incomplete graphs — and
  /// delegates to the injected renderer with the template style:
  /// abstract nodes blue and labelled "ABC Node", concrete nodes orange
  /// and labelled "template". Returns `None` when no renderer was
  /// supplied.
  ///
  /// # Errors
  ///
  /// Returns [`GraphBuildError`] when base construction fails. Never
  /// returns a classification error.
  pub fn visualize(&self) -> Result<Option<RenderedGraph>, GraphBuildError> {
    let candidate = self.inner.build()?;
    match &self.renderer {
      Some(renderer) => Ok(Some(
        candidate.display_all_functions(renderer.as_ref(), &template_style),
      )),
      None => Ok(None),
    }
  }
}
