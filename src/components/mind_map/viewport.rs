//! Pan and zoom state, and screen↔world coordinate transforms.
//!
//! # Coordinate Spaces
//!
//! - **World**: layout coordinates, independent of pan and zoom.
//! - **Screen**: logical (CSS) pixels relative to the canvas origin.
//!
//! `screen = world * scale + offset`, so `world = (screen - offset) / scale`.

use super::config::{LayoutConfig, ViewportConfig};
use super::graph::NodeIdx;
use super::layout::{Layout, Point};

/// Pointer gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
	#[default]
	Idle,
	/// Background pan. `anchor` is the pointer position minus the offset at
	/// pointer-down, in screen pixels.
	Dragging { anchor: Point },
}

/// View transform plus hover/selection.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
	/// Zoom factor, kept within the configured range.
	pub scale: f64,
	/// Pan offset in screen pixels.
	pub offset: Point,
	pub pointer: PointerState,
	pub hovered: Option<NodeIdx>,
	pub selected: Option<NodeIdx>,
}

impl Default for ViewState {
	fn default() -> Self {
		Self {
			scale: 1.0,
			offset: Point::default(),
			pointer: PointerState::Idle,
			hovered: None,
			selected: None,
		}
	}
}

impl ViewState {
	pub fn screen_to_world(&self, screen: Point) -> Point {
		Point::new(
			(screen.x - self.offset.x) / self.scale,
			(screen.y - self.offset.y) / self.scale,
		)
	}

	pub fn world_to_screen(&self, world: Point) -> Point {
		Point::new(
			world.x * self.scale + self.offset.x,
			world.y * self.scale + self.offset.y,
		)
	}

	/// Set the zoom factor, saturating at the configured bounds.
	pub fn set_scale(&mut self, scale: f64, config: &ViewportConfig) {
		self.scale = scale.clamp(config.min_scale, config.max_scale);
	}

	/// Apply one wheel notch: scrolling down (`delta_y > 0`) zooms out and
	/// scrolling up zooms in. A purely horizontal scroll leaves the zoom alone.
	pub fn zoom_wheel(&mut self, delta_y: f64, config: &ViewportConfig) {
		let step = if delta_y > 0.0 {
			-config.zoom_step
		} else if delta_y < 0.0 {
			config.zoom_step
		} else {
			return;
		};
		self.set_scale(self.scale + step, config);
	}

	pub fn zoom_in(&mut self, config: &ViewportConfig) {
		self.set_scale(self.scale + config.zoom_step, config);
	}

	pub fn zoom_out(&mut self, config: &ViewportConfig) {
		self.set_scale(self.scale - config.zoom_step, config);
	}

	/// Start a background pan at `screen`.
	pub fn begin_drag(&mut self, screen: Point) {
		self.pointer = PointerState::Dragging {
			anchor: Point::new(screen.x - self.offset.x, screen.y - self.offset.y),
		};
	}

	/// Follow the pointer while panning. Returns `false` when idle.
	pub fn drag_to(&mut self, screen: Point) -> bool {
		match self.pointer {
			PointerState::Dragging { anchor } => {
				self.offset = Point::new(screen.x - anchor.x, screen.y - anchor.y);
				true
			}
			PointerState::Idle => false,
		}
	}

	pub fn end_drag(&mut self) {
		self.pointer = PointerState::Idle;
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.pointer, PointerState::Dragging { .. })
	}

	/// Pan so the node's box center lands on the center of a viewport of
	/// `viewport` logical size at the current scale, and select it.
	///
	/// Returns `false` and leaves the view untouched if the node has no
	/// position.
	pub fn center_on(
		&mut self,
		idx: NodeIdx,
		layout: &Layout,
		viewport: Point,
		config: &LayoutConfig,
	) -> bool {
		let Some(pos) = layout.position(idx) else {
			return false;
		};
		let center = Point::new(
			pos.x + config.node_width / 2.0,
			pos.y + config.node_height / 2.0,
		);
		self.offset = Point::new(
			viewport.x / 2.0 - center.x * self.scale,
			viewport.y / 2.0 - center.y * self.scale,
		);
		self.selected = Some(idx);
		true
	}

	/// Back to 100% zoom at the origin with nothing selected.
	pub fn reset(&mut self) {
		self.scale = 1.0;
		self.offset = Point::default();
		self.selected = None;
	}
}
