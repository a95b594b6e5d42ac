//! Graph description structures accepted from the host.

use indexmap::IndexMap;
use serde::Deserialize;

/// A node as described by the host.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
	/// Node identifier. The key in [`GraphData::nodes`] is authoritative.
	#[serde(default)]
	pub id: String,
	/// Display label. May contain lightweight markdown or `$...$` math.
	#[serde(default)]
	pub label: String,
	/// Longer text surfaced by the host when the node is hovered or selected.
	pub description: Option<String>,
	/// Ordered child node ids. Absent or `null` is normalized to no children.
	#[serde(default)]
	pub children: Option<Vec<String>>,
	/// Whether the label or description carries rich text.
	#[serde(default)]
	pub has_rich_text: bool,
}

/// Complete diagram: title, root id and node map.
///
/// `root_id` and `nodes` are optional here so a malformed description still
/// parses and can be rejected with a precise [`GraphError`](super::GraphError).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
	#[serde(default)]
	pub title: String,
	pub root_id: Option<String>,
	/// Node map in input order.
	pub nodes: Option<IndexMap<String, NodeData>>,
}

/// Text the host displays for the hovered or selected node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDetails {
	pub id: String,
	pub label: String,
	pub description: Option<String>,
}
