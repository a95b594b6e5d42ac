//! Pointer input → hover, selection and pan.
//!
//! Handlers take positions in screen pixels, hit-test in world space, and
//! report what changed so the host can be notified only on real transitions.

use super::config::{LayoutConfig, ViewportConfig};
use super::graph::NodeIdx;
use super::layout::{Layout, Point};
use super::viewport::ViewState;

/// Observable outcome of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
	SelectionChanged(Option<NodeIdx>),
	HoverChanged(Option<NodeIdx>),
}

/// Canvas cursor reflecting hover/drag state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
	/// Over empty canvas.
	Grab,
	/// Panning.
	Grabbing,
	/// Over a node.
	Pointer,
}

impl Cursor {
	pub fn as_css(self) -> &'static str {
		match self {
			Cursor::Grab => "grab",
			Cursor::Grabbing => "grabbing",
			Cursor::Pointer => "pointer",
		}
	}
}

/// Node whose base box contains `world`, edges included.
///
/// Nodes are checked in arena order and the last match wins. Where base boxes
/// overlap the pick follows input order; scaled boxes are not considered.
pub fn hit_test(layout: &Layout, world: Point, config: &LayoutConfig) -> Option<NodeIdx> {
	let mut found = None;
	for (idx, pos) in layout.iter() {
		if world.x >= pos.x
			&& world.x <= pos.x + config.node_width
			&& world.y >= pos.y
			&& world.y <= pos.y + config.node_height
		{
			found = Some(idx);
		}
	}
	found
}

/// Pointer pressed: toggle selection on a node, otherwise start panning.
pub fn pointer_down(
	view: &mut ViewState,
	layout: &Layout,
	screen: Point,
	config: &LayoutConfig,
) -> Option<InteractionEvent> {
	match hit_test(layout, view.screen_to_world(screen), config) {
		Some(idx) => {
			view.selected = if view.selected == Some(idx) {
				None
			} else {
				Some(idx)
			};
			Some(InteractionEvent::SelectionChanged(view.selected))
		}
		None => {
			view.begin_drag(screen);
			None
		}
	}
}

/// Pointer moved: pan while dragging, otherwise update hover.
pub fn pointer_move(
	view: &mut ViewState,
	layout: &Layout,
	screen: Point,
	config: &LayoutConfig,
) -> Option<InteractionEvent> {
	if view.drag_to(screen) {
		return None;
	}
	let hovered = hit_test(layout, view.screen_to_world(screen), config);
	set_hover(view, hovered)
}

/// Pointer released.
pub fn pointer_up(view: &mut ViewState) {
	view.end_drag();
}

/// Pointer left the canvas: stop panning and clear hover.
pub fn pointer_leave(view: &mut ViewState) -> Option<InteractionEvent> {
	view.end_drag();
	set_hover(view, None)
}

/// Wheel notch, independent of drag and hover.
pub fn wheel(view: &mut ViewState, delta_y: f64, config: &ViewportConfig) {
	view.zoom_wheel(delta_y, config);
}

pub fn cursor(view: &ViewState) -> Cursor {
	if view.is_dragging() {
		Cursor::Grabbing
	} else if view.hovered.is_some() {
		Cursor::Pointer
	} else {
		Cursor::Grab
	}
}

fn set_hover(view: &mut ViewState, hovered: Option<NodeIdx>) -> Option<InteractionEvent> {
	if view.hovered == hovered {
		return None;
	}
	view.hovered = hovered;
	Some(InteractionEvent::HoverChanged(hovered))
}
