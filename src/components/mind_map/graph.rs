//! Validated, immutable mind map graph.
//!
//! Nodes are stored in an arena in input order and addressed by [`NodeIdx`].
//! Child references are resolved once at load time, and a child→parent index
//! is built by a breadth-first walk from the root so the layout never has to
//! scan for parents.

use std::collections::{HashMap, VecDeque};

use log::{info, warn};
use thiserror::Error;

use super::types::{GraphData, NodeDetails};

/// Index of a node in the [`MindMap`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub usize);

/// Reasons a graph description is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
	#[error("graph has no root id")]
	MissingRoot,
	#[error("graph has no node map")]
	MissingNodeMap,
	#[error("root node `{0}` is not in the node map")]
	RootNotFound(String),
}

/// A node after validation, with children resolved to arena indices.
#[derive(Clone, Debug)]
pub struct MindMapNode {
	pub id: String,
	pub label: String,
	pub description: Option<String>,
	pub children: Vec<NodeIdx>,
	pub has_rich_text: bool,
}

/// The loaded diagram. Read-only once built.
#[derive(Clone, Debug)]
pub struct MindMap {
	title: String,
	root: NodeIdx,
	nodes: Vec<MindMapNode>,
	index: HashMap<String, NodeIdx>,
	parents: Vec<Option<NodeIdx>>,
}

impl MindMap {
	/// Validate a graph description and build the arena.
	///
	/// Children that do not resolve to a node are dropped with a warning.
	pub fn load(data: &GraphData) -> Result<Self, GraphError> {
		let root_id = match data.root_id.as_deref() {
			Some(id) if !id.is_empty() => id,
			_ => return Err(GraphError::MissingRoot),
		};
		let node_map = data.nodes.as_ref().ok_or(GraphError::MissingNodeMap)?;

		let index: HashMap<String, NodeIdx> = node_map
			.keys()
			.enumerate()
			.map(|(i, id)| (id.clone(), NodeIdx(i)))
			.collect();
		let root = *index
			.get(root_id)
			.ok_or_else(|| GraphError::RootNotFound(root_id.to_string()))?;

		let nodes = node_map
			.iter()
			.map(|(id, node)| {
				let children = node
					.children
					.iter()
					.flatten()
					.filter_map(|child| {
						let idx = index.get(child).copied();
						if idx.is_none() {
							warn!("mind-map: node `{}` lists unknown child `{}`", id, child);
						}
						idx
					})
					.collect();
				MindMapNode {
					id: id.clone(),
					label: node.label.clone(),
					description: node.description.clone(),
					children,
					has_rich_text: node.has_rich_text,
				}
			})
			.collect::<Vec<_>>();

		let parents = bfs_parents(&nodes, root);

		info!(
			"mind-map: loaded \"{}\" with {} nodes",
			data.title,
			nodes.len()
		);

		Ok(Self {
			title: data.title.clone(),
			root,
			nodes,
			index,
			parents,
		})
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn root(&self) -> NodeIdx {
		self.root
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, idx: NodeIdx) -> Option<&MindMapNode> {
		self.nodes.get(idx.0)
	}

	pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
		self.index.get(id).copied()
	}

	pub fn children_of(&self, idx: NodeIdx) -> &[NodeIdx] {
		self.nodes
			.get(idx.0)
			.map(|n| n.children.as_slice())
			.unwrap_or(&[])
	}

	/// Layout parent: the first node to reach `idx` in a BFS from the root.
	pub fn parent_of(&self, idx: NodeIdx) -> Option<NodeIdx> {
		self.parents.get(idx.0).copied().flatten()
	}

	/// All nodes in arena (input) order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, &MindMapNode)> {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
	}

	pub fn details(&self, idx: NodeIdx) -> Option<NodeDetails> {
		self.node(idx).map(|n| NodeDetails {
			id: n.id.clone(),
			label: n.label.clone(),
			description: n.description.clone(),
		})
	}
}

fn bfs_parents(nodes: &[MindMapNode], root: NodeIdx) -> Vec<Option<NodeIdx>> {
	let mut parents = vec![None; nodes.len()];
	let mut seen = vec![false; nodes.len()];
	let mut queue = VecDeque::from([root]);
	seen[root.0] = true;

	while let Some(idx) = queue.pop_front() {
		for &child in &nodes[idx.0].children {
			if !seen[child.0] {
				seen[child.0] = true;
				parents[child.0] = Some(idx);
				queue.push_back(child);
			}
		}
	}
	parents
}
