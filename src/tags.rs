//! # Node Tags and Classification
//!
//! Tags are free-form string key-value annotations attached to node
//! definitions at authoring time. Most tags are opaque metadata for
//! querying (see [`crate::graph::Graph::list_available_variables`]); the
//! reserved `node_type` key is special: the value `abstract` marks a node
//! as a placeholder with no executable body.
//!
//! The abstract/concrete distinction is also carried as a [`NodeKind`]
//! enum attached at node-construction time, so the classifier never has
//! to re-parse strings. Node constructors keep the tag map and the enum
//! in sync; graph assembly rejects definitions where they disagree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered tag mapping attached to a node definition.
///
/// A `BTreeMap` keeps tag enumeration deterministic, which keeps rendered
/// output and error text reproducible.
pub type TagMap = BTreeMap<String, String>;

/// Reserved tag key carrying the node's classification.
pub const NODE_TYPE_KEY: &str = "node_type";

/// Value of [`NODE_TYPE_KEY`] marking a placeholder node.
pub const ABSTRACT_VALUE: &str = "abstract";

/// Classification of a node definition.
///
/// `Abstract` nodes are design-time placeholders: they occupy a position
/// in the graph topology but have no executable body. Any other tagging
/// (including no `node_type` tag at all) means `Concrete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
  /// A fully implemented node with an executable body.
  #[default]
  Concrete,
  /// A placeholder node awaiting a concrete implementation.
  Abstract,
}

impl NodeKind {
  /// Derives the kind from a tag map.
  ///
  /// Returns `Abstract` exactly when the reserved `node_type` tag equals
  /// `abstract`; any other value, or its absence, is `Concrete`.
  #[must_use]
  pub fn from_tags(tags: &TagMap) -> Self {
    match tags.get(NODE_TYPE_KEY).map(String::as_str) {
      Some(ABSTRACT_VALUE) => NodeKind::Abstract,
      _ => NodeKind::Concrete,
    }
  }

  /// Returns `true` for [`NodeKind::Abstract`].
  #[must_use]
  pub fn is_abstract(self) -> bool {
    matches!(self, NodeKind::Abstract)
  }
}

/// Checks whether `tags` matches every key-value pair in `filter`.
///
/// An empty filter matches everything.
#[must_use]
pub fn matches_filter(tags: &TagMap, filter: &TagMap) -> bool {
  filter
    .iter()
    .all(|(k, v)| tags.get(k).is_some_and(|tag| tag == v))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tags(pairs: &[(&str, &str)]) -> TagMap {
    pairs
      .iter()
      .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
      .collect()
  }

  #[test]
  fn kind_from_abstract_tag() {
    let t = tags(&[(NODE_TYPE_KEY, ABSTRACT_VALUE)]);
    assert_eq!(NodeKind::from_tags(&t), NodeKind::Abstract);
    assert!(NodeKind::from_tags(&t).is_abstract());
  }

  #[test]
  fn kind_defaults_to_concrete() {
    assert_eq!(NodeKind::from_tags(&TagMap::new()), NodeKind::Concrete);
    let other = tags(&[(NODE_TYPE_KEY, "interface")]);
    assert_eq!(NodeKind::from_tags(&other), NodeKind::Concrete);
    let unrelated = tags(&[("team", "growth")]);
    assert_eq!(NodeKind::from_tags(&unrelated), NodeKind::Concrete);
  }

  #[test]
  fn filter_matches_subset() {
    let t = tags(&[(NODE_TYPE_KEY, ABSTRACT_VALUE), ("team", "growth")]);
    assert!(matches_filter(&t, &tags(&[(NODE_TYPE_KEY, ABSTRACT_VALUE)])));
    assert!(matches_filter(&t, &TagMap::new()));
    assert!(!matches_filter(&t, &tags(&[("team", "infra")])));
    assert!(!matches_filter(&t, &tags(&[("missing", "x")])));
  }
}
