//! # Graph
//!
//! This module defines the immutable [`Graph`] assembled from node
//! definitions and configuration.
//!
//! ## Structure
//!
//! A graph consists of:
//!
//! - **Nodes**: definitions in registration order (the graph's natural
//!   enumeration order),
//! - **Edges**: dependencies derived from input-name matching — a node
//!   input named after another node becomes an edge from that node,
//! - **Graph inputs**: input names matched by no node; these must be
//!   supplied by configuration or at execution time.
//!
//! ## Immutability
//!
//! Assembly validates the definition set (unique and non-reserved names,
//! kind/body agreement, acyclic dependencies) and then never mutates the
//! graph again. Builders construct a fresh graph per invocation; queries
//! like [`Graph::list_available_variables`] are pure and recompute their
//! results on demand.

use crate::edge::Edge;
use crate::error::GraphBuildError;
use crate::node::NodeDef;
use crate::render::{GraphRenderer, RenderedGraph};
use crate::style::StyleFn;
use crate::tags::{NodeKind, TagMap, matches_filter};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::debug;

/// Node name reserved for the graph I/O namespace.
pub const RESERVED_NODE_NAME: &str = "graph";

/// Structural classification of a node within a graph, used for
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
  /// A node with no declared inputs.
  Source,
  /// A node whose output feeds at least one other node.
  Transform,
  /// A node whose output feeds no other node.
  Sink,
}

/// An immutable pipeline graph: ordered nodes plus derived dependency
/// edges.
#[derive(Debug)]
pub struct Graph {
  name: String,
  nodes: Vec<NodeDef>,
  index: HashMap<String, usize>,
  edges: Vec<Edge>,
  graph_inputs: Vec<String>,
  bound: BTreeMap<String, Value>,
  topo: Vec<String>,
}

impl Graph {
  /// Assembles a graph from node definitions and configuration.
  ///
  /// # Arguments
  ///
  /// * `name` - The graph's name
  /// * `nodes` - Node definitions in registration order
  /// * `config` - Configuration values; each key pre-binds the
  ///   graph-level input of the same name
  ///
  /// # Errors
  ///
  /// Returns [`GraphBuildError`] if a node name is duplicated or
  /// reserved, a definition's kind and body disagree, a config key
  /// shadows a node, or the derived edges contain a cycle.
  pub(crate) fn assemble(
    name: String,
    nodes: Vec<NodeDef>,
    config: BTreeMap<String, Value>,
  ) -> Result<Self, GraphBuildError> {
    let mut index = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
      if node.name() == RESERVED_NODE_NAME {
        return Err(GraphBuildError::ReservedName(node.name().to_string()));
      }
      if index.insert(node.name().to_string(), i).is_some() {
        return Err(GraphBuildError::DuplicateNode(node.name().to_string()));
      }
      match (node.kind(), node.body()) {
        (NodeKind::Abstract, Some(_)) => {
          return Err(GraphBuildError::AbstractBody(node.name().to_string()));
        }
        (NodeKind::Concrete, None) => {
          return Err(GraphBuildError::MissingBody(node.name().to_string()));
        }
        _ => {}
      }
    }

    for key in config.keys() {
      if index.contains_key(key) {
        return Err(GraphBuildError::ConfigShadowsNode(key.clone()));
      }
    }

    let mut edges = Vec::new();
    let mut graph_inputs: Vec<String> = Vec::new();
    for node in &nodes {
      for input in node.inputs() {
        if index.contains_key(input) {
          edges.push(Edge::new(input.clone(), node.name()));
        } else if !graph_inputs.iter().any(|i| i == input) {
          graph_inputs.push(input.clone());
        }
      }
    }

    let topo = topological_order(&nodes, &edges)?;

    debug!(
      graph = %name,
      nodes = nodes.len(),
      edges = edges.len(),
      inputs = graph_inputs.len(),
      "assembled graph"
    );

    Ok(Self {
      name,
      nodes,
      index,
      edges,
      graph_inputs,
      bound: config,
      topo,
    })
  }

  /// Returns the graph's name.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Returns all nodes in registration order.
  #[must_use]
  pub fn nodes(&self) -> &[NodeDef] {
    &self.nodes
  }

  /// Returns all derived dependency edges.
  #[must_use]
  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  /// Returns the graph-level input names, in first-reference order.
  ///
  /// These are input names matched by no node. Some may already be
  /// pre-bound by configuration; see [`Graph::bound_inputs`].
  #[must_use]
  pub fn graph_inputs(&self) -> &[String] {
    &self.graph_inputs
  }

  /// Returns the configuration values bound at construction time.
  #[must_use]
  pub fn bound_inputs(&self) -> &BTreeMap<String, Value> {
    &self.bound
  }

  /// Gets a node by name.
  #[must_use]
  pub fn node(&self, name: &str) -> Option<&NodeDef> {
    self.index.get(name).map(|&i| &self.nodes[i])
  }

  /// Returns the structural role of the named node, if it exists.
  ///
  /// A node with no declared inputs is a [`NodeRole::Source`]; a node
  /// feeding no other node is a [`NodeRole::Sink`]; everything else is a
  /// [`NodeRole::Transform`]. A node that is both (isolated) counts as a
  /// source.
  #[must_use]
  pub fn role_of(&self, name: &str) -> Option<NodeRole> {
    let node = self.node(name)?;
    if node.inputs().is_empty() {
      Some(NodeRole::Source)
    } else if self.edges.iter().any(|e| e.source == name) {
      Some(NodeRole::Transform)
    } else {
      Some(NodeRole::Sink)
    }
  }

  /// Lists node names matching a tag filter.
  ///
  /// With `None`, every node name is returned. With a filter, only nodes
  /// whose tag map contains every key-value pair of the filter are
  /// returned. Order is the graph's natural node enumeration order
  /// (registration order); names are unique, so the result holds no
  /// duplicates. Pure query, linear in node count.
  #[must_use]
  pub fn list_available_variables(&self, tag_filter: Option<&TagMap>) -> Vec<String> {
    self
      .nodes
      .iter()
      .filter(|n| tag_filter.is_none_or(|f| matches_filter(n.tags(), f)))
      .map(|n| n.name().to_string())
      .collect()
  }

  /// Renders every node of the graph through the given renderer.
  ///
  /// The style function decides per-node presentation; the renderer
  /// decides the output format. This entry point performs no
  /// classification guard — incomplete graphs render fine, which is the
  /// point of template pipelines.
  #[must_use]
  pub fn display_all_functions(
    &self,
    renderer: &dyn GraphRenderer,
    style: &StyleFn,
  ) -> RenderedGraph {
    renderer.render(self, style)
  }

  /// Serializes the graph's structure (not its bodies) to pretty JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if JSON serialization fails.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct NodeView<'a> {
      name: &'a str,
      inputs: &'a [String],
      output_type: &'a str,
      tags: &'a TagMap,
      kind: NodeKind,
      role: NodeRole,
    }

    #[derive(Serialize)]
    struct GraphView<'a> {
      name: &'a str,
      nodes: Vec<NodeView<'a>>,
      edges: &'a [Edge],
      inputs: &'a [String],
    }

    let view = GraphView {
      name: &self.name,
      nodes: self
        .nodes
        .iter()
        .map(|n| NodeView {
          name: n.name(),
          inputs: n.inputs(),
          output_type: n.output_type(),
          tags: n.tags(),
          kind: n.kind(),
          role: self.role_of(n.name()).unwrap_or(NodeRole::Transform),
        })
        .collect(),
      edges: &self.edges,
      inputs: &self.graph_inputs,
    };
    serde_json::to_string_pretty(&view)
  }

  /// Returns node names in dependency order (sources first).
  pub(crate) fn topo_order(&self) -> &[String] {
    &self.topo
  }
}

/// Computes a topological order of the nodes (Kahn's algorithm).
///
/// Returns node names sources-first, or a cycle error naming every node
/// left unordered, in registration order.
fn topological_order(nodes: &[NodeDef], edges: &[Edge]) -> Result<Vec<String>, GraphBuildError> {
  let mut in_degree: HashMap<&str, usize> = HashMap::new();
  let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();

  for node in nodes {
    in_degree.insert(node.name(), 0);
    adjacency.insert(node.name(), Vec::new());
  }

  for edge in edges {
    adjacency
      .get_mut(edge.source.as_str())
      .expect("edge source derived from a registered node")
      .push(edge.target.as_str());
    *in_degree
      .get_mut(edge.target.as_str())
      .expect("edge target derived from a registered node") += 1;
  }

  // Seed in registration order so the result is deterministic.
  let mut queue: VecDeque<&str> = nodes
    .iter()
    .map(NodeDef::name)
    .filter(|n| in_degree[n] == 0)
    .collect();

  let mut ordered = Vec::with_capacity(nodes.len());
  while let Some(name) = queue.pop_front() {
    ordered.push(name.to_string());
    if let Some(neighbors) = adjacency.get(name) {
      for &neighbor in neighbors {
        let degree = in_degree
          .get_mut(neighbor)
          .expect("neighbor is a registered node");
        *degree -= 1;
        if *degree == 0 {
          queue.push_back(neighbor);
        }
      }
    }
  }

  if ordered.len() != nodes.len() {
    let stuck: Vec<String> = nodes
      .iter()
      .map(NodeDef::name)
      .filter(|n| !ordered.iter().any(|o| o.as_str() == *n))
      .map(str::to_string)
      .collect();
    return Err(GraphBuildError::Cycle(stuck));
  }

  Ok(ordered)
}
