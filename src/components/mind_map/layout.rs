//! Level-based tree layout with sibling overlap resolution.
//!
//! Positions are the top-left corner of each node box in world coordinates.
//! The root sits at `(width / 2, top_margin)`; every deeper level is spread
//! over the middle 80% of the canvas and pulled 30% towards the parent so
//! subtrees stay grouped. A bounded number of passes then pushes apart
//! same-level nodes whose boxes collide.

use log::debug;

use super::config::LayoutConfig;
use super::graph::{MindMap, NodeIdx};
use super::levels::Levels;

/// A 2D point or vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Computed node positions plus the canvas size needed to show them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	positions: Vec<Option<Point>>,
	/// Logical canvas width after growth.
	pub width: f64,
	/// Logical canvas height after growth.
	pub height: f64,
	/// Overlap resolution passes that ran.
	pub passes: usize,
}

impl Layout {
	/// Lay out every reachable node for a canvas of the given logical size.
	///
	/// Deterministic: depends only on the graph, its levels, the size and
	/// the config.
	pub fn compute(
		graph: &MindMap,
		levels: &Levels,
		width: f64,
		height: f64,
		config: &LayoutConfig,
	) -> Self {
		let mut positions = vec![None; graph.len()];
		positions[graph.root().0] = Some(Point::new(width / 2.0, config.top_margin));

		let level_width = width * 0.8;
		let start_x = width * 0.1;

		for (level, nodes) in levels.iter().skip(1) {
			let y = config.top_margin + level as f64 * config.vertical_spacing;
			let count = nodes.len();

			for (i, &idx) in nodes.iter().enumerate() {
				let parent_x = graph
					.parent_of(idx)
					.and_then(|p| positions[p.0])
					.map_or(width / 2.0, |p: Point| p.x);

				let x = if count == 1 {
					parent_x
				} else {
					let spread = start_x + i as f64 * (level_width / (count - 1) as f64);
					spread * 0.7 + parent_x * 0.3
				};
				positions[idx.0] = Some(Point::new(x, y));
			}
		}

		let passes = resolve_overlaps(&mut positions, levels, config);

		let (mut max_x, mut max_y) = (0.0_f64, 0.0_f64);
		for p in positions.iter().flatten() {
			max_x = max_x.max(p.x + config.node_width);
			max_y = max_y.max(p.y + config.node_height);
		}
		let grown_width = width.max(max_x + config.canvas_margin);
		let grown_height = height.max(max_y + config.canvas_margin);

		debug!(
			"mind-map: layout {} nodes in {} passes, canvas {}x{}",
			positions.iter().flatten().count(),
			passes,
			grown_width,
			grown_height
		);

		Self {
			positions,
			width: grown_width,
			height: grown_height,
			passes,
		}
	}

	/// Top-left corner of a node, or `None` when it was not laid out.
	pub fn position(&self, idx: NodeIdx) -> Option<Point> {
		self.positions.get(idx.0).copied().flatten()
	}

	/// Positioned nodes in arena order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, Point)> + '_ {
		self.positions
			.iter()
			.enumerate()
			.filter_map(|(i, p)| p.map(|p| (NodeIdx(i), p)))
	}
}

/// Push apart adjacent same-level nodes until no box overlaps or the pass
/// limit is hit. Returns the number of passes run.
fn resolve_overlaps(
	positions: &mut [Option<Point>],
	levels: &Levels,
	config: &LayoutConfig,
) -> usize {
	let min_distance = config.node_width + config.sibling_gap;
	let mut passes = 0;

	while passes < config.max_resolution_passes {
		passes += 1;
		let mut moved = false;

		for (_, nodes) in levels.iter() {
			let mut row: Vec<NodeIdx> = nodes
				.iter()
				.copied()
				.filter(|idx| positions[idx.0].is_some())
				.collect();
			if row.len() < 2 {
				continue;
			}
			// Stable, so equal x keeps BFS order.
			row.sort_by(|a, b| x_of(positions, *a).total_cmp(&x_of(positions, *b)));

			for pair in row.windows(2) {
				let (left, right) = (pair[0], pair[1]);
				let overlap = x_of(positions, left) + min_distance - x_of(positions, right);
				if overlap > 0.0 {
					shift_x(positions, left, -overlap / 2.0);
					shift_x(positions, right, overlap / 2.0);
					moved = true;
				}
			}
		}

		if !moved {
			break;
		}
	}
	passes
}

fn x_of(positions: &[Option<Point>], idx: NodeIdx) -> f64 {
	positions[idx.0].map_or(0.0, |p| p.x)
}

fn shift_x(positions: &mut [Option<Point>], idx: NodeIdx, dx: f64) {
	if let Some(p) = positions[idx.0].as_mut() {
		p.x += dx;
	}
}
