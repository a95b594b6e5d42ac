//! Breadth-first depth assignment from the root.

use std::collections::VecDeque;

use super::graph::{MindMap, NodeIdx};

/// BFS depth of every node reachable from the root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Levels {
	by_node: Vec<Option<usize>>,
	/// Nodes of each depth, in BFS visiting order.
	by_depth: Vec<Vec<NodeIdx>>,
}

impl Levels {
	/// Walk the graph from its root. Each node is visited once, so repeated
	/// references and cycles terminate; unreachable nodes get no level.
	pub fn assign(graph: &MindMap) -> Self {
		let mut by_node = vec![None; graph.len()];
		let mut by_depth: Vec<Vec<NodeIdx>> = Vec::new();
		let mut queue = VecDeque::new();

		let root = graph.root();
		by_node[root.0] = Some(0);
		queue.push_back(root);

		while let Some(idx) = queue.pop_front() {
			let Some(level) = by_node[idx.0] else {
				continue;
			};
			if by_depth.len() <= level {
				by_depth.resize_with(level + 1, Vec::new);
			}
			by_depth[level].push(idx);

			for &child in graph.children_of(idx) {
				if by_node[child.0].is_none() {
					by_node[child.0] = Some(level + 1);
					queue.push_back(child);
				}
			}
		}

		Self { by_node, by_depth }
	}

	/// Depth of a node, or `None` if it cannot be reached from the root.
	pub fn get(&self, idx: NodeIdx) -> Option<usize> {
		self.by_node.get(idx.0).copied().flatten()
	}

	/// Number of distinct depths.
	pub fn depth_count(&self) -> usize {
		self.by_depth.len()
	}

	pub fn nodes_at(&self, level: usize) -> &[NodeIdx] {
		self.by_depth.get(level).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Iterate `(level, nodes)` from the root downwards.
	pub fn iter(&self) -> impl Iterator<Item = (usize, &[NodeIdx])> {
		self.by_depth
			.iter()
			.enumerate()
			.map(|(level, nodes)| (level, nodes.as_slice()))
	}
}
