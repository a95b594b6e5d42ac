//! Hover/select grow feedback and the fixed-rate timer that drives it.
//!
//! Each tick moves every node's scale a fixed fraction of the way towards its
//! target, which gives exponential ease-out without tracking time. A wrapping
//! frame counter feeds the idle "breathing" effect.

use std::f64::consts::TAU;

use log::debug;
use wasm_bindgen::prelude::*;

use super::config::AnimationConfig;
use super::graph::NodeIdx;
use super::viewport::ViewState;

/// Smoothed per-node scale factors and the breathing counter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimState {
	scales: Vec<f64>,
	frame: u32,
}

impl AnimState {
	/// Every node starts at the idle scale.
	pub fn new(node_count: usize, config: &AnimationConfig) -> Self {
		Self {
			scales: vec![config.idle_scale; node_count],
			frame: 0,
		}
	}

	/// Target scale for a node given the current hover/selection.
	pub fn target(idx: NodeIdx, view: &ViewState, config: &AnimationConfig) -> f64 {
		if view.selected == Some(idx) {
			config.selected_scale
		} else if view.hovered == Some(idx) {
			config.hovered_scale
		} else {
			config.idle_scale
		}
	}

	/// Advance one tick.
	pub fn tick(&mut self, view: &ViewState, config: &AnimationConfig) {
		for (i, scale) in self.scales.iter_mut().enumerate() {
			let target = Self::target(NodeIdx(i), view, config);
			*scale += (target - *scale) * config.smoothing;
		}
		self.frame = (self.frame + 1) % config.breathing_period.max(1);
	}

	/// Current scale of a node; unknown nodes draw at 1.0.
	pub fn scale(&self, idx: NodeIdx) -> f64 {
		self.scales.get(idx.0).copied().unwrap_or(1.0)
	}

	pub fn frame(&self) -> u32 {
		self.frame
	}

	/// Idle oscillation in `[-1, 1]`, one full cycle per counter period.
	pub fn breathing(&self, config: &AnimationConfig) -> f64 {
		let period = config.breathing_period.max(1) as f64;
		(self.frame as f64 / period * TAU).sin()
	}
}

/// A running `setInterval` timer. Dropping it clears the interval and
/// releases the callback.
pub struct AnimationTimer {
	handle: i32,
	_callback: Closure<dyn FnMut()>,
}

impl AnimationTimer {
	/// Call `on_tick` every `interval_ms` until the timer is dropped.
	pub fn start(interval_ms: i32, on_tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let callback = Closure::<dyn FnMut()>::new(on_tick);
		let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
			callback.as_ref().unchecked_ref(),
			interval_ms,
		)?;
		debug!("mind-map: animation timer {} started ({} ms)", handle, interval_ms);
		Ok(Self {
			handle,
			_callback: callback,
		})
	}
}

impl Drop for AnimationTimer {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			window.clear_interval_with_handle(self.handle);
		}
		debug!("mind-map: animation timer {} stopped", self.handle);
	}
}
