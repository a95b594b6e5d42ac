//! Window event listener tied to a Rust owner.

use log::debug;
use wasm_bindgen::prelude::*;

/// A callback registered on `window` for one event type. Dropping it removes
/// the listener before the closure is released.
pub struct WindowListener {
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl WindowListener {
	/// Call `handler` on every `event` dispatched to the window.
	pub fn add(event: &'static str, handler: impl FnMut() + 'static) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let callback = Closure::<dyn FnMut()>::new(handler);
		window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		debug!("mind-map: `{}` listener added", event);
		Ok(Self { event, callback })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window
				.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
		}
		debug!("mind-map: `{}` listener removed", self.event);
	}
}
