//! # Error Types
//!
//! Errors are split by layer, mirroring the component boundaries:
//!
//! - [`GraphBuildError`]: the base construction layer rejects malformed
//!   definition sets (duplicate or reserved names, body/kind mismatches,
//!   config shadowing a node, dependency cycles).
//! - [`ClassificationError`]: the template layer's single error kind,
//!   raised only by [`crate::template::AbcBuilder::build`] when the
//!   candidate graph still contains abstract nodes.
//! - [`AbcBuildError`]: the sum of the two on the guarded build path.
//! - [`ExecutionError`]: the synchronous executor's failures.
//!
//! Visualization has no error kind of its own: an absent rendering
//! capability degrades to an absent result, and construction failures on
//! the visualize path surface as [`GraphBuildError`].

use thiserror::Error;

/// Error raised while assembling a [`crate::graph::Graph`] from node
/// definitions and configuration.
#[derive(Debug, Error)]
pub enum GraphBuildError {
  /// Two node definitions share a name.
  #[error("duplicate node name '{0}'")]
  DuplicateNode(String),
  /// A node uses a name reserved for the graph I/O namespace.
  #[error("node name '{0}' is reserved for the graph I/O namespace")]
  ReservedName(String),
  /// An abstract node definition carries an executable body.
  #[error("abstract node '{0}' must not carry a body")]
  AbstractBody(String),
  /// A concrete node definition is missing its body.
  #[error("concrete node '{0}' is missing a body")]
  MissingBody(String),
  /// A config key collides with a node name.
  #[error("config key '{0}' shadows a node of the same name")]
  ConfigShadowsNode(String),
  /// The dependency edges contain a cycle.
  #[error("dependency cycle among nodes: {}", .0.join(", "))]
  Cycle(Vec<String>),
}

/// Abstract-node violation raised by the guarded build path.
///
/// The message enumerates every offending node name exactly once, in the
/// graph's node enumeration order, so the caller can locate and implement
/// each placeholder. Never raised by the visualize path.
#[derive(Debug, Error)]
#[error("cannot build a runnable graph with abstract nodes; implement the following: {}", .nodes.join(", "))]
pub struct ClassificationError {
  /// Names of the abstract nodes found in the candidate graph.
  pub nodes: Vec<String>,
}

/// Failure of [`crate::template::AbcBuilder::build`]: either the base
/// construction step failed, or the candidate graph failed classification.
#[derive(Debug, Error)]
pub enum AbcBuildError {
  /// The base construction layer rejected the definition set.
  #[error(transparent)]
  Construction(#[from] GraphBuildError),
  /// The candidate graph still contains abstract nodes.
  #[error(transparent)]
  Classification(#[from] ClassificationError),
}

/// Error raised by the synchronous executor.
#[derive(Debug, Error)]
pub enum ExecutionError {
  /// A requested output names neither a node nor a graph input.
  #[error("unknown variable '{0}'")]
  UnknownVariable(String),
  /// A graph input required by an executed node was not supplied.
  #[error("node '{node}' requires input '{input}', which was not supplied")]
  MissingInput {
    /// The node that declared the input.
    node: String,
    /// The unsatisfied input name.
    input: String,
  },
  /// An abstract node was reached during execution.
  ///
  /// Unreachable through graphs produced by the guarded build path.
  #[error("node '{0}' is abstract and has no executable body")]
  AbstractNode(String),
  /// A node body returned an error.
  #[error("node '{node}' failed: {message}")]
  Body {
    /// The failing node.
    node: String,
    /// The body's error, rendered to text.
    message: String,
  },
}
