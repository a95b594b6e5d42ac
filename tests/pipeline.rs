//! End-to-end checks of the load → levels → layout → view pipeline.

use indexmap::IndexMap;
use mind_map_canvas::components::mind_map::config::{LayoutConfig, ViewportConfig};
use mind_map_canvas::components::mind_map::interaction::InteractionEvent;
use mind_map_canvas::components::mind_map::layout::{Layout, Point};
use mind_map_canvas::components::mind_map::levels::Levels;
use mind_map_canvas::components::mind_map::state::{MindMapState, Surface};
use mind_map_canvas::components::mind_map::viewport::ViewState;
use mind_map_canvas::components::mind_map::MindMap;
use mind_map_canvas::{GraphData, GraphError, MindMapConfig, NodeData};
use proptest::prelude::*;

const STATISTICS: &str = r#"{
	"title": "Statistics",
	"rootId": "stats",
	"nodes": {
		"stats": {
			"id": "stats",
			"label": "**Statistics**",
			"description": "Collecting and interpreting data",
			"children": ["desc", "infer"]
		},
		"desc": { "id": "desc", "label": "Descriptive", "children": ["mean", "var"] },
		"infer": { "id": "infer", "label": "Inference", "children": ["ci", "stats"] },
		"mean": { "id": "mean", "label": "Mean $\\bar{x}$", "children": null, "hasRichText": true },
		"var": { "id": "var", "label": "Variance" },
		"ci": { "id": "ci", "label": "Confidence intervals", "children": ["ghost"] },
		"orphan": { "id": "orphan", "label": "Unlinked note" }
	}
}"#;

fn statistics() -> GraphData {
	serde_json::from_str(STATISTICS).unwrap()
}

#[test]
fn json_to_positioned_scene() {
	let mut state = MindMapState::new(MindMapConfig::default(), Surface::new(1200.0, 800.0, 1.0));
	state.load(&statistics()).unwrap();

	let scene = state.scene.as_ref().unwrap();
	let graph = &scene.graph;
	let id = |s: &str| graph.index_of(s).unwrap();

	assert_eq!(scene.levels.get(id("stats")), Some(0));
	assert_eq!(scene.levels.get(id("infer")), Some(1));
	assert_eq!(scene.levels.get(id("ci")), Some(2));
	assert_eq!(scene.levels.get(id("orphan")), None);
	assert_eq!(scene.layout.position(id("orphan")), None);

	// The dangling `ghost` reference is dropped, the back edge to the root kept.
	assert!(graph.children_of(id("ci")).is_empty());
	assert_eq!(graph.children_of(id("infer")), &[id("ci"), id("stats")]);

	assert_eq!(scene.layout.position(id("stats")), Some(Point::new(600.0, 60.0)));
	for (idx, pos) in scene.layout.iter() {
		let level = scene.levels.get(idx).unwrap();
		assert_eq!(pos.y, 60.0 + level as f64 * 140.0);
	}
}

#[test]
fn invalid_descriptions_are_rejected() {
	let mut state = MindMapState::new(MindMapConfig::default(), Surface::new(800.0, 600.0, 1.0));

	let missing_root: GraphData = serde_json::from_str(r#"{ "title": "x", "nodes": {} }"#).unwrap();
	assert_eq!(state.load(&missing_root), Err(GraphError::MissingRoot));

	let no_nodes: GraphData = serde_json::from_str(r#"{ "rootId": "a" }"#).unwrap();
	assert_eq!(state.load(&no_nodes), Err(GraphError::MissingNodeMap));

	let unknown: GraphData =
		serde_json::from_str(r#"{ "rootId": "a", "nodes": { "b": {} } }"#).unwrap();
	assert_eq!(state.load(&unknown), Err(GraphError::RootNotFound("a".into())));
	assert!(state.scene.is_none());
}

#[test]
fn select_then_pan_then_hover() {
	let mut state = MindMapState::new(MindMapConfig::default(), Surface::new(1200.0, 800.0, 1.0));
	state.load(&statistics()).unwrap();
	let root = state.scene.as_ref().unwrap().graph.root();

	// Root box spans (600..780, 60..124).
	assert_eq!(
		state.pointer_down(Point::new(690.0, 90.0)),
		Some(InteractionEvent::SelectionChanged(Some(root)))
	);
	state.pointer_up();

	// Background press pans without touching the selection.
	assert_eq!(state.pointer_down(Point::new(20.0, 700.0)), None);
	assert_eq!(state.pointer_move(Point::new(70.0, 720.0)), None);
	state.pointer_up();
	assert_eq!(state.view.offset, Point::new(50.0, 20.0));
	assert_eq!(state.view.selected, Some(root));

	assert_eq!(
		state.pointer_move(Point::new(740.0, 110.0)),
		Some(InteractionEvent::HoverChanged(Some(root)))
	);
	assert_eq!(
		state.pointer_leave(),
		Some(InteractionEvent::HoverChanged(None))
	);
}

#[test]
fn config_overrides_flow_into_layout() {
	let config: MindMapConfig =
		serde_json::from_str(r#"{ "layout": { "topMargin": 100, "verticalSpacing": 200 } }"#)
			.unwrap();
	let mut state = MindMapState::new(config, Surface::new(1200.0, 800.0, 1.0));
	state.load(&statistics()).unwrap();

	let scene = state.scene.as_ref().unwrap();
	let ci = scene.graph.index_of("ci").unwrap();
	assert_eq!(scene.layout.position(ci).map(|p| p.y), Some(500.0));
}

/// Root `r` with `n` leaf children, laid out at `width`.
fn star_layout(n: usize, width: f64) -> (Layout, Vec<f64>) {
	let mut nodes = IndexMap::new();
	let children: Vec<String> = (0..n).map(|i| format!("c{}", i)).collect();
	nodes.insert(
		"r".to_string(),
		NodeData {
			children: Some(children.clone()),
			..Default::default()
		},
	);
	for id in children {
		nodes.insert(id, NodeData::default());
	}
	let data = GraphData {
		title: "star".into(),
		root_id: Some("r".into()),
		nodes: Some(nodes),
	};
	let graph = MindMap::load(&data).unwrap();
	let levels = Levels::assign(&graph);
	let layout = Layout::compute(&graph, &levels, width, 600.0, &LayoutConfig::default());

	let mut xs: Vec<f64> = levels
		.nodes_at(1)
		.iter()
		.map(|idx| layout.position(*idx).unwrap().x)
		.collect();
	xs.sort_by(f64::total_cmp);
	(layout, xs)
}

fn min_gap(xs: &[f64]) -> f64 {
	xs.windows(2).map(|w| w[1] - w[0]).fold(f64::INFINITY, f64::min)
}

#[test]
fn narrow_siblings_separate_before_the_cap() {
	let (layout, xs) = star_layout(2, 300.0);
	assert_eq!(layout.passes, 2);
	assert!((min_gap(&xs) - 210.0).abs() < 1e-9);
}

#[test]
fn crowded_level_stops_at_the_pass_cap() {
	// Pushing one pair apart squeezes its neighbours; five passes are not
	// enough to settle four siblings, so a small overlap remains.
	let (layout, xs) = star_layout(4, 1000.0);
	assert_eq!(layout.passes, LayoutConfig::default().max_resolution_passes);
	let gap = min_gap(&xs);
	assert!(gap < 210.0 && gap > 208.0, "gap {}", gap);
}

/// Random graphs: node `i > 0` hangs under an earlier node, plus a few
/// extra references that may point anywhere, cycles included.
fn arb_graph() -> impl Strategy<Value = GraphData> {
	(1usize..24)
		.prop_flat_map(|n| {
			let parents = proptest::collection::vec(any::<prop::sample::Index>(), n - 1);
			let extras = proptest::collection::vec(
				(any::<prop::sample::Index>(), any::<prop::sample::Index>()),
				0..6,
			);
			(Just(n), parents, extras)
		})
		.prop_map(|(n, parents, extras)| {
			let mut children: Vec<Vec<String>> = vec![Vec::new(); n];
			for (i, p) in parents.iter().enumerate() {
				children[p.index(i + 1)].push(format!("n{}", i + 1));
			}
			for (from, to) in &extras {
				children[from.index(n)].push(format!("n{}", to.index(n)));
			}
			let nodes: IndexMap<String, NodeData> = children
				.into_iter()
				.enumerate()
				.map(|(i, children)| {
					let id = format!("n{}", i);
					let node = NodeData {
						id: id.clone(),
						label: id.clone(),
						children: Some(children),
						..Default::default()
					};
					(id, node)
				})
				.collect();
			GraphData {
				title: "generated".into(),
				root_id: Some("n0".into()),
				nodes: Some(nodes),
			}
		})
}

proptest! {
	#[test]
	fn every_reachable_node_is_one_below_its_parent(data in arb_graph()) {
		let graph = MindMap::load(&data).unwrap();
		let levels = Levels::assign(&graph);

		prop_assert_eq!(levels.get(graph.root()), Some(0));
		for (idx, _) in graph.iter() {
			// Tree edges make every node reachable.
			let level = levels.get(idx);
			prop_assert!(level.is_some());
			if let Some(parent) = graph.parent_of(idx) {
				prop_assert_eq!(level, levels.get(parent).map(|l| l + 1));
			}
		}
	}

	#[test]
	fn layout_is_deterministic_and_fits_canvas(
		data in arb_graph(),
		width in 200.0f64..2000.0,
		height in 200.0f64..1200.0,
	) {
		let config = LayoutConfig::default();
		let graph = MindMap::load(&data).unwrap();
		let levels = Levels::assign(&graph);

		let first = Layout::compute(&graph, &levels, width, height, &config);
		let second = Layout::compute(&graph, &levels, width, height, &config);
		prop_assert_eq!(&first, &second);

		prop_assert!(first.width >= width && first.height >= height);
		prop_assert!(first.passes <= config.max_resolution_passes);
		for (idx, pos) in first.iter() {
			let level = levels.get(idx).unwrap() as f64;
			prop_assert_eq!(pos.y, config.top_margin + level * config.vertical_spacing);
			prop_assert!(pos.x + config.node_width + config.canvas_margin <= first.width + 1e-9);
			prop_assert!(pos.y + config.node_height + config.canvas_margin <= first.height + 1e-9);
		}

		// Stopping before the cap means a full pass found nothing to move.
		if first.passes < config.max_resolution_passes {
			let min_distance = config.node_width + config.sibling_gap;
			for level in 0..levels.depth_count() {
				let row = levels.nodes_at(level);
				for (i, a) in row.iter().enumerate() {
					for b in &row[i + 1..] {
						let (xa, xb) = (first.position(*a).unwrap().x, first.position(*b).unwrap().x);
						prop_assert!(
							(xa - xb).abs() >= min_distance - 1e-9,
							"level {} gap {} after {} passes",
							level,
							(xa - xb).abs(),
							first.passes
						);
					}
				}
			}
		}
	}

	#[test]
	fn zoom_stays_clamped(deltas in proptest::collection::vec(-500.0f64..500.0, 0..60)) {
		let config = ViewportConfig::default();
		let mut view = ViewState::default();
		for delta in deltas {
			view.zoom_wheel(delta, &config);
			prop_assert!(view.scale >= config.min_scale - 1e-12);
			prop_assert!(view.scale <= config.max_scale + 1e-12);
		}
	}

	#[test]
	fn screen_and_world_are_inverse(
		scale in 0.5f64..2.0,
		ox in -1000.0f64..1000.0,
		oy in -1000.0f64..1000.0,
		x in -2000.0f64..2000.0,
		y in -2000.0f64..2000.0,
	) {
		let view = ViewState { scale, offset: Point::new(ox, oy), ..Default::default() };
		let back = view.world_to_screen(view.screen_to_world(Point::new(x, y)));
		prop_assert!((back.x - x).abs() < 1e-9);
		prop_assert!((back.y - y).abs() < 1e-9);
	}
}
