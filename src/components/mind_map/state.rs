//! Mind map state and its recomputation pipeline.
//!
//! ```text
//! GraphData ──load──► MindMap ──► Levels ──┐
//!                                          ├──► Layout (positions, canvas size)
//!                   Surface (w, h) ────────┘
//! pointer events ──► ViewState      timer ──► AnimState
//! ```
//!
//! Levels are derived once per graph; the layout is recomputed only when the
//! graph or the logical surface size changes. View and animation state never
//! feed back into the layout.

use log::warn;

use super::animation::AnimState;
use super::config::MindMapConfig;
use super::graph::{GraphError, MindMap, NodeIdx};
use super::interaction::{self, Cursor, InteractionEvent};
use super::layout::{Layout, Point};
use super::levels::Levels;
use super::types::{GraphData, NodeDetails};
use super::viewport::ViewState;

/// Logical drawing surface supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
	pub device_pixel_ratio: f64,
}

impl Surface {
	pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
		Self {
			width,
			height,
			device_pixel_ratio: if device_pixel_ratio > 0.0 {
				device_pixel_ratio
			} else {
				1.0
			},
		}
	}
}

/// A loaded graph with everything derived from it.
#[derive(Clone, Debug)]
pub struct Scene {
	pub graph: MindMap,
	pub levels: Levels,
	pub layout: Layout,
}

/// Everything the canvas needs between events.
///
/// Created once when the component mounts. `scene` is `None` until a valid
/// graph is loaded, and again after a graph is rejected.
pub struct MindMapState {
	pub config: MindMapConfig,
	pub scene: Option<Scene>,
	pub view: ViewState,
	pub anim: AnimState,
	surface: Surface,
	layout_runs: usize,
}

impl MindMapState {
	pub fn new(config: MindMapConfig, surface: Surface) -> Self {
		Self {
			config,
			scene: None,
			view: ViewState::default(),
			anim: AnimState::default(),
			surface,
			layout_runs: 0,
		}
	}

	/// Replace the current graph wholesale. View and animation state reset.
	///
	/// On error the previous graph is dropped and nothing is drawn.
	pub fn load(&mut self, data: &GraphData) -> Result<(), GraphError> {
		self.clear();
		let graph = MindMap::load(data).inspect_err(|e| warn!("mind-map: rejected graph: {}", e))?;
		let levels = Levels::assign(&graph);
		let layout = self.compute_layout(&graph, &levels);
		self.anim = AnimState::new(graph.len(), &self.config.animation);
		self.scene = Some(Scene {
			graph,
			levels,
			layout,
		});
		Ok(())
	}

	/// Drop the current graph and reset view and animation state.
	pub fn clear(&mut self) {
		self.scene = None;
		self.view = ViewState::default();
		self.anim = AnimState::default();
	}

	/// Update the surface. Relayout happens only if the logical size changed;
	/// a new pixel ratio only affects the backing store. Returns whether
	/// anything changed.
	pub fn resize(&mut self, surface: Surface) -> bool {
		if surface == self.surface {
			return false;
		}
		let size_changed =
			surface.width != self.surface.width || surface.height != self.surface.height;
		self.surface = surface;

		if size_changed {
			if let Some(scene) = self.scene.take() {
				let layout = self.compute_layout(&scene.graph, &scene.levels);
				self.scene = Some(Scene { layout, ..scene });
			}
		}
		true
	}

	fn compute_layout(&mut self, graph: &MindMap, levels: &Levels) -> Layout {
		self.layout_runs += 1;
		Layout::compute(
			graph,
			levels,
			self.surface.width,
			self.surface.height,
			&self.config.layout,
		)
	}

	pub fn surface(&self) -> Surface {
		self.surface
	}

	/// How many times the layout has been computed.
	pub fn layout_runs(&self) -> usize {
		self.layout_runs
	}

	/// Logical canvas size: the surface, grown to fit the layout.
	pub fn canvas_size(&self) -> (f64, f64) {
		match &self.scene {
			Some(scene) => (scene.layout.width, scene.layout.height),
			None => (self.surface.width, self.surface.height),
		}
	}

	/// Backing store size in device pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		let (w, h) = self.canvas_size();
		let dpr = self.surface.device_pixel_ratio;
		((w * dpr).round() as u32, (h * dpr).round() as u32)
	}

	/// Advance the animation by one timer tick.
	pub fn tick(&mut self) {
		self.anim.tick(&self.view, &self.config.animation);
	}

	pub fn pointer_down(&mut self, screen: Point) -> Option<InteractionEvent> {
		let scene = self.scene.as_ref()?;
		interaction::pointer_down(&mut self.view, &scene.layout, screen, &self.config.layout)
	}

	pub fn pointer_move(&mut self, screen: Point) -> Option<InteractionEvent> {
		let scene = self.scene.as_ref()?;
		interaction::pointer_move(&mut self.view, &scene.layout, screen, &self.config.layout)
	}

	pub fn pointer_up(&mut self) {
		interaction::pointer_up(&mut self.view);
	}

	pub fn pointer_leave(&mut self) -> Option<InteractionEvent> {
		interaction::pointer_leave(&mut self.view)
	}

	pub fn wheel(&mut self, delta_y: f64) {
		interaction::wheel(&mut self.view, delta_y, &self.config.viewport);
	}

	pub fn zoom_in(&mut self) {
		self.view.zoom_in(&self.config.viewport);
	}

	pub fn zoom_out(&mut self) {
		self.view.zoom_out(&self.config.viewport);
	}

	pub fn cursor(&self) -> Cursor {
		interaction::cursor(&self.view)
	}

	/// Center the visible surface on node `id` and select it. Reports a
	/// selection change only if `id` was not already selected.
	pub fn center_on(&mut self, id: &str) -> Option<InteractionEvent> {
		let scene = self.scene.as_ref()?;
		let idx = scene.graph.index_of(id)?;
		let viewport = Point::new(self.surface.width, self.surface.height);
		let previous = self.view.selected;
		let centered = self
			.view
			.center_on(idx, &scene.layout, viewport, &self.config.layout);
		(centered && previous != Some(idx)).then_some(InteractionEvent::SelectionChanged(Some(idx)))
	}

	pub fn reset_view(&mut self) -> Option<InteractionEvent> {
		let had_selection = self.view.selected.is_some();
		self.view.reset();
		had_selection.then_some(InteractionEvent::SelectionChanged(None))
	}

	/// Label and description of a node for the host.
	pub fn details(&self, idx: NodeIdx) -> Option<NodeDetails> {
		self.scene.as_ref()?.graph.details(idx)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn data(json: &str) -> GraphData {
		serde_json::from_str(json).unwrap()
	}

	fn abc() -> GraphData {
		data(r#"{ "title": "Stats", "rootId": "A", "nodes": { "A": { "children": ["B", "C"] }, "B": {}, "C": {} } }"#)
	}

	fn state() -> MindMapState {
		MindMapState::new(MindMapConfig::default(), Surface::new(1000.0, 600.0, 2.0))
	}

	#[test]
	fn load_builds_scene_and_resets_view() {
		let mut s = state();
		s.view.scale = 1.8;
		s.load(&abc()).unwrap();

		let scene = s.scene.as_ref().unwrap();
		assert_eq!(scene.graph.title(), "Stats");
		assert_eq!(scene.layout.position(scene.graph.root()), Some(Point::new(500.0, 60.0)));
		assert_eq!(s.view, ViewState::default());
		assert_eq!(s.layout_runs(), 1);
	}

	#[test]
	fn rejected_graph_clears_previous_scene() {
		let mut s = state();
		s.load(&abc()).unwrap();

		let err = s
			.load(&data(r#"{ "rootId": "missing", "nodes": { "A": {} } }"#))
			.unwrap_err();
		assert_eq!(err, GraphError::RootNotFound("missing".into()));
		assert!(s.scene.is_none());
		assert_eq!(s.canvas_size(), (1000.0, 600.0));
		assert_eq!(s.pointer_down(Point::new(590.0, 90.0)), None);
	}

	#[test]
	fn clear_drops_scene_and_selection() {
		let mut s = state();
		s.load(&abc()).unwrap();
		s.center_on("C");
		s.view.scale = 1.5;

		s.clear();
		assert!(s.scene.is_none());
		assert_eq!(s.view, ViewState::default());
		assert_eq!(s.canvas_size(), (1000.0, 600.0));
		assert_eq!(s.pointer_down(Point::new(590.0, 90.0)), None);
	}

	#[test]
	fn layout_recomputes_only_on_size_change() {
		let mut s = state();
		s.load(&abc()).unwrap();

		assert!(!s.resize(Surface::new(1000.0, 600.0, 2.0)));
		assert_eq!(s.layout_runs(), 1);

		assert!(s.resize(Surface::new(1000.0, 600.0, 3.0)));
		assert_eq!(s.layout_runs(), 1);
		assert_eq!(s.backing_size(), (3000, 1800));

		s.view.hovered = Some(NodeIdx(1));
		s.tick();
		assert_eq!(s.layout_runs(), 1);

		assert!(s.resize(Surface::new(800.0, 600.0, 3.0)));
		assert_eq!(s.layout_runs(), 2);
		let scene = s.scene.as_ref().unwrap();
		assert_eq!(scene.layout.position(scene.graph.root()), Some(Point::new(400.0, 60.0)));
	}

	#[test]
	fn backing_store_scales_grown_canvas() {
		let mut s = MindMapState::new(MindMapConfig::default(), Surface::new(300.0, 200.0, 2.0));
		s.load(&abc()).unwrap();
		let (w, h) = s.canvas_size();
		assert!(w >= 300.0 && h > 200.0);
		assert_eq!(s.backing_size(), ((w * 2.0).round() as u32, (h * 2.0).round() as u32));
	}

	#[test]
	fn center_on_selects_and_reports() {
		let mut s = state();
		s.load(&abc()).unwrap();
		let b = s.scene.as_ref().unwrap().graph.index_of("B").unwrap();

		assert_eq!(s.center_on("B"), Some(InteractionEvent::SelectionChanged(Some(b))));
		assert_eq!(s.view.selected, Some(b));
		// B's center (310, 232) lands on the surface center (500, 300).
		assert_eq!(s.view.world_to_screen(Point::new(310.0, 232.0)), Point::new(500.0, 300.0));

		// Centering again still pans but the selection did not change.
		s.view.offset = Point::default();
		assert_eq!(s.center_on("B"), None);
		assert_eq!(s.view.world_to_screen(Point::new(310.0, 232.0)), Point::new(500.0, 300.0));

		assert_eq!(s.center_on("nope"), None);
		assert_eq!(s.reset_view(), Some(InteractionEvent::SelectionChanged(None)));
		assert_eq!(s.reset_view(), None);
	}

	#[test]
	fn click_selects_and_details_follow() {
		let mut s = state();
		s.load(&data(
			r#"{ "rootId": "A", "nodes": { "A": { "label": "Probability", "description": "Measure on events" } } }"#,
		))
		.unwrap();

		let event = s.pointer_down(Point::new(590.0, 90.0));
		let Some(InteractionEvent::SelectionChanged(Some(idx))) = event else {
			panic!("expected a selection, got {:?}", event);
		};
		let details = s.details(idx).unwrap();
		assert_eq!(details.label, "Probability");
		assert_eq!(details.description.as_deref(), Some("Measure on events"));
	}
}
