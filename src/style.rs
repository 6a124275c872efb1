//! # Node Styling
//!
//! A style function decides how each node of a graph is presented by a
//! renderer: a mapping of style attributes (e.g. `fillcolor`), the
//! node's structural role passed through for shape selection, and a
//! label.
//!
//! The built-in [`template_style`] distinguishes abstract placeholders
//! from concrete nodes, which is what makes template pipelines readable
//! at design time: an incomplete graph shows at a glance which parts
//! still need an implementation.

use crate::graph::NodeRole;
use crate::node::NodeDef;
use std::collections::BTreeMap;

/// Fill color applied to abstract placeholder nodes.
pub const ABSTRACT_FILLCOLOR: &str = "blue";

/// Fill color applied to concrete nodes.
pub const DEFAULT_FILLCOLOR: &str = "orange";

/// Label applied to abstract placeholder nodes.
pub const ABSTRACT_LABEL: &str = "ABC Node";

/// Label applied to concrete nodes.
pub const DEFAULT_LABEL: &str = "template";

/// Per-node presentation decided by a style function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
  /// Style attributes for the renderer (e.g. `fillcolor`).
  pub attributes: BTreeMap<String, String>,
  /// The node's structural role, passed through to the renderer.
  pub role: NodeRole,
  /// Label text shown on the node.
  pub label: String,
}

/// A style-selection function: node descriptor and structural role in,
/// [`NodeStyle`] out.
pub type StyleFn = dyn Fn(&NodeDef, NodeRole) -> NodeStyle + Send + Sync;

/// The template style: abstract nodes blue and labelled "ABC Node",
/// everything else orange and labelled "template". The role is passed
/// through unchanged.
#[must_use]
pub fn template_style(node: &NodeDef, role: NodeRole) -> NodeStyle {
  let (fill, label) = if node.kind().is_abstract() {
    (ABSTRACT_FILLCOLOR, ABSTRACT_LABEL)
  } else {
    (DEFAULT_FILLCOLOR, DEFAULT_LABEL)
  };
  let mut attributes = BTreeMap::new();
  attributes.insert("fillcolor".to_string(), fill.to_string());
  NodeStyle {
    attributes,
    role,
    label: label.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn abstract_nodes_get_abstract_style() {
    let node = NodeDef::abstract_node("pre_process", ["raw"], "json");
    let style = template_style(&node, NodeRole::Transform);
    assert_eq!(style.label, "ABC Node");
    assert_eq!(
      style.attributes.get("fillcolor").map(String::as_str),
      Some(ABSTRACT_FILLCOLOR)
    );
    assert_eq!(style.role, NodeRole::Transform);
  }

  #[test]
  fn concrete_nodes_get_default_style() {
    let node = NodeDef::concrete("raw", Vec::<String>::new(), "json", |_| Ok(json!(0)));
    let style = template_style(&node, NodeRole::Source);
    assert_eq!(style.label, "template");
    assert_eq!(
      style.attributes.get("fillcolor").map(String::as_str),
      Some(DEFAULT_FILLCOLOR)
    );
    assert_eq!(style.role, NodeRole::Source);
  }

  #[test]
  fn other_node_type_values_are_concrete() {
    let node = NodeDef::concrete("n", Vec::<String>::new(), "json", |_| Ok(json!(0)))
      .with_tag("node_type", "interface");
    let style = template_style(&node, NodeRole::Sink);
    assert_eq!(style.label, "template");
  }
}
