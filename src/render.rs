//! # Graph Rendering
//!
//! This module provides the rendering capability consumed by the
//! visualize path.
//!
//! Rendering is modelled as an injected capability: the template builder
//! holds an optional [`GraphRenderer`], and when none was supplied the
//! visualize operation degrades to an absent result instead of failing.
//! Rendering itself is infallible — it produces text, not I/O.
//!
//! ## Supported Formats
//!
//! - **DOT**: Graphviz DOT format via [`DotRenderer`], suitable for
//!   `dot -Tpng` and friends.

use crate::graph::{Graph, NodeRole};
use crate::style::StyleFn;
use std::fmt::Write;

/// A rendered graph: format tag plus source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGraph {
  format: &'static str,
  source: String,
}

impl RenderedGraph {
  /// Creates a rendered graph with the given format tag and source text.
  #[must_use]
  pub fn new(format: &'static str, source: String) -> Self {
    Self { format, source }
  }

  /// Returns the format tag (e.g. `"dot"`).
  #[must_use]
  pub fn format(&self) -> &str {
    self.format
  }

  /// Returns the rendered source text.
  #[must_use]
  pub fn source(&self) -> &str {
    &self.source
  }

  /// Consumes the rendering and returns its source text.
  #[must_use]
  pub fn into_source(self) -> String {
    self.source
  }
}

/// Rendering capability over constructed graphs.
///
/// Implementations turn a graph plus a style-selection function into a
/// [`RenderedGraph`]. The style function decides per-node presentation;
/// the renderer owns format syntax only.
pub trait GraphRenderer {
  /// Renders the graph, consulting the style function for every node.
  fn render(&self, graph: &Graph, style: &StyleFn) -> RenderedGraph;
}

/// Graphviz DOT renderer.
///
/// Every node is emitted with the style function's attributes and label,
/// a shape derived from its structural role, and a sanitized identifier.
/// Graph-level inputs appear as dashed boxes feeding their consumers.
///
/// # Example
///
/// ```rust
/// use dagweave::graph_builder::GraphBuilder;
/// use dagweave::module::NodeModule;
/// use dagweave::node::NodeDef;
/// use dagweave::render::{DotRenderer, GraphRenderer};
/// use dagweave::style::template_style;
///
/// let graph = GraphBuilder::new("p")
///   .with_module(NodeModule::new("m").with_node(NodeDef::abstract_node(
///     "pre_process",
///     ["raw"],
///     "json",
///   )))
///   .build()?;
/// let rendered = DotRenderer::new().render(&graph, &template_style);
/// assert!(rendered.source().contains("digraph"));
/// # Ok::<(), dagweave::error::GraphBuildError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

impl DotRenderer {
  /// Creates a DOT renderer.
  #[must_use]
  pub fn new() -> Self {
    Self
  }
}

impl GraphRenderer for DotRenderer {
  fn render(&self, graph: &Graph, style: &StyleFn) -> RenderedGraph {
    let mut output = String::new();

    // Write graph header
    writeln!(output, "digraph {} {{", sanitize_id(graph.name())).unwrap();
    writeln!(output, "  rankdir=LR;").unwrap();
    writeln!(output, "  node [style=\"rounded,filled\"];").unwrap();

    // Write nodes
    for node in graph.nodes() {
      let role = graph
        .role_of(node.name())
        .unwrap_or(NodeRole::Transform);
      let node_style = style(node, role);
      let node_id = sanitize_id(node.name());
      let shape = shape_for_role(node_style.role);
      let label = format!(
        "{}\\n{}",
        escape_dot_string(node.name()),
        escape_dot_string(&node_style.label)
      );

      let mut attrs = String::new();
      for (key, value) in &node_style.attributes {
        write!(
          attrs,
          ", {}=\"{}\"",
          sanitize_id(key),
          escape_dot_string(value)
        )
        .unwrap();
      }

      writeln!(
        output,
        "  {} [label=\"{}\", shape={}{}];",
        node_id, label, shape, attrs
      )
      .unwrap();
    }

    // Write graph-level inputs as dashed boxes
    for input in graph.graph_inputs() {
      writeln!(
        output,
        "  {} [label=\"{}\", shape=box, style=dashed];",
        sanitize_id(input),
        escape_dot_string(input)
      )
      .unwrap();
    }

    // Write edges, including input-to-consumer edges
    for edge in graph.edges() {
      writeln!(
        output,
        "  {} -> {};",
        sanitize_id(&edge.source),
        sanitize_id(&edge.target)
      )
      .unwrap();
    }
    for node in graph.nodes() {
      for input in node.inputs() {
        if graph.node(input).is_none() {
          writeln!(
            output,
            "  {} -> {};",
            sanitize_id(input),
            sanitize_id(node.name())
          )
          .unwrap();
        }
      }
    }

    writeln!(output, "}}").unwrap();
    RenderedGraph::new("dot", output)
  }
}

/// Maps a structural role to a DOT shape.
fn shape_for_role(role: NodeRole) -> &'static str {
  match role {
    NodeRole::Source => "ellipse",
    NodeRole::Transform => "box",
    NodeRole::Sink => "note",
  }
}

/// Sanitizes a string to be a valid DOT identifier.
///
/// DOT identifiers can only contain alphanumeric characters and
/// underscores; invalid characters are replaced with underscores.
fn sanitize_id(id: &str) -> String {
  id.chars()
    .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
    .collect()
}

/// Escapes special characters in a string for use in DOT labels.
fn escape_dot_string(s: &str) -> String {
  s.replace('\\', "\\\\")
    .replace('"', "\\\"")
    .replace('\n', "\\n")
    .replace('\r', "\\r")
    .replace('\t', "\\t")
}
