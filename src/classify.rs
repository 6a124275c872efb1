//! Node classification over constructed graphs.
//!
//! A read-only query surface answering "which nodes of this graph are
//! abstract placeholders". The query filters on the [`NodeKind`]
//! attached at node-construction time; the open-ended tag query lives on
//! [`Graph::list_available_variables`](crate::graph::Graph::list_available_variables).

use crate::graph::Graph;

/// Returns the names of all abstract nodes in the graph.
///
/// Order is the graph's natural node enumeration order; names are unique
/// so the result holds no duplicates. Pure query with no side effects,
/// linear in node count, recomputed on every call. An empty graph yields
/// an empty result.
#[must_use]
pub fn abstract_nodes(graph: &Graph) -> Vec<String> {
  graph
    .nodes()
    .iter()
    .filter(|n| n.kind().is_abstract())
    .map(|n| n.name().to_string())
    .collect()
}
