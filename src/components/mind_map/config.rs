//! Tunable constants for layout, viewport and animation.
//!
//! Every section implements [`Default`] with the values the mind map ships
//! with. All structs deserialize with `#[serde(default)]`, so a host can
//! override a subset from JSON and keep the rest.

use serde::Deserialize;

/// Tree layout geometry, in world units.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
	/// Base node box width (also the hit-test width).
	pub node_width: f64,
	/// Base node box height (also the hit-test height).
	pub node_height: f64,
	/// Y of the root level.
	pub top_margin: f64,
	/// Distance between consecutive levels.
	pub vertical_spacing: f64,
	/// Minimum horizontal gap between same-level nodes after resolution.
	pub sibling_gap: f64,
	/// Extra space kept past the outermost node when growing the canvas.
	pub canvas_margin: f64,
	/// Upper bound on overlap resolution passes.
	pub max_resolution_passes: usize,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_width: 180.0,
			node_height: 64.0,
			top_margin: 60.0,
			vertical_spacing: 140.0,
			sibling_gap: 30.0,
			canvas_margin: 40.0,
			max_resolution_passes: 5,
		}
	}
}

/// Pan/zoom limits.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	/// Scale change per wheel notch.
	pub zoom_step: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.5,
			max_scale: 2.0,
			zoom_step: 0.1,
		}
	}
}

/// Hover/select grow feedback and idle animation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
	/// Timer period in milliseconds (50 ms is ~20 Hz).
	pub tick_interval_ms: i32,
	/// Fraction of the remaining distance covered per tick.
	pub smoothing: f64,
	pub idle_scale: f64,
	pub hovered_scale: f64,
	pub selected_scale: f64,
	/// The frame counter wraps at this value.
	pub breathing_period: u32,
}

impl Default for AnimationConfig {
	fn default() -> Self {
		Self {
			tick_interval_ms: 50,
			smoothing: 0.1,
			idle_scale: 1.0,
			hovered_scale: 1.05,
			selected_scale: 1.10,
			breathing_period: 100,
		}
	}
}

/// Complete mind map configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MindMapConfig {
	pub layout: LayoutConfig,
	pub viewport: ViewportConfig,
	pub animation: AnimationConfig,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_remaining_defaults() {
		let config: MindMapConfig =
			serde_json::from_str(r#"{ "layout": { "nodeWidth": 200 }, "viewport": { "maxScale": 3 } }"#)
				.unwrap();

		assert_eq!(config.layout.node_width, 200.0);
		assert_eq!(config.layout.node_height, LayoutConfig::default().node_height);
		assert_eq!(config.viewport.max_scale, 3.0);
		assert_eq!(config.viewport.min_scale, 0.5);
		assert_eq!(config.animation, AnimationConfig::default());
	}

	#[test]
	fn empty_object_is_default() {
		let config: MindMapConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, MindMapConfig::default());
	}
}
