//! Leptos component wrapping the mind map canvas.
//!
//! The component creates an HTML canvas element, sizes its backing store for
//! the device pixel ratio, and wires mouse/wheel events into the state. A
//! fixed-rate animation timer advances hover/select feedback and redraws. The
//! timer and the fullscreen resize listener live exactly as long as the
//! component.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window,
};

use super::animation::AnimationTimer;
use super::config::MindMapConfig;
use super::interaction::InteractionEvent;
use super::layout::Point;
use super::listener::WindowListener;
use super::render;
use super::state::{MindMapState, Surface};
use super::theme::Theme;
use super::types::{GraphData, NodeDetails};

/// Bundles mind map state with the canvas it draws on.
struct MindMapContext {
	state: MindMapState,
	theme: Theme,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl MindMapContext {
	/// Resize the backing store (device pixels) while keeping the CSS size
	/// at the logical canvas size, then redraw.
	fn redraw(&self) {
		let (w, h) = self.state.canvas_size();
		let (bw, bh) = self.state.backing_size();
		if self.canvas.width() != bw || self.canvas.height() != bh {
			self.canvas.set_width(bw);
			self.canvas.set_height(bh);
			let style = HtmlElement::style(&self.canvas);
			let _ = style.set_property("width", &format!("{}px", w));
			let _ = style.set_property("height", &format!("{}px", h));
		}
		let _ = HtmlElement::style(&self.canvas).set_property("cursor", self.state.cursor().as_css());
		render::render(&self.state, &self.ctx, &self.theme);
	}
}

/// Host notification hooks.
#[derive(Clone, Copy)]
struct Notify {
	on_select: Option<Callback<Option<NodeDetails>>>,
	on_hover: Option<Callback<Option<NodeDetails>>>,
}

impl Notify {
	fn send(&self, state: &MindMapState, event: Option<InteractionEvent>) {
		match event {
			Some(InteractionEvent::SelectionChanged(idx)) => {
				if let Some(cb) = self.on_select {
					cb.run(idx.and_then(|i| state.details(i)));
				}
			}
			Some(InteractionEvent::HoverChanged(idx)) => {
				if let Some(cb) = self.on_hover {
					cb.run(idx.and_then(|i| state.details(i)));
				}
			}
			None => {}
		}
	}
}

fn surface_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> Surface {
	let dpr = window.device_pixel_ratio();
	if fullscreen {
		return Surface::new(
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
			dpr,
		);
	}
	Surface::new(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
		dpr,
	)
}

fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Point {
	let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an interactive mind map on a canvas element.
///
/// Pass the diagram via the reactive `data` signal; a new value replaces the
/// diagram wholesale. The canvas sizes itself to its parent container by
/// default; set `fullscreen = true` to fill the window and follow resizes.
/// An invalid diagram is reported inline instead of drawn, as is any message
/// in `source_error` (for example a failure to parse the diagram upstream).
///
/// `focus` centers the view on a node id whenever it changes. `on_select`
/// and `on_hover` receive the affected node's details, or `None` when the
/// selection or hover is cleared.
#[component]
pub fn MindMapCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] config: Option<MindMapConfig>,
	#[prop(optional, into)] source_error: Option<Signal<Option<String>>>,
	#[prop(optional, into)] focus: Option<Signal<Option<String>>>,
	#[prop(optional)] on_select: Option<Callback<Option<NodeDetails>>>,
	#[prop(optional)] on_hover: Option<Callback<Option<NodeDetails>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<MindMapContext>>> = Rc::new(RefCell::new(None));
	let timer = StoredValue::new_local(None::<AnimationTimer>);
	let resize = StoredValue::new_local(None::<WindowListener>);
	let error = RwSignal::new(None::<String>);
	let notify = Notify { on_select, on_hover };
	let config = config.unwrap_or_default();

	on_cleanup(move || {
		timer.set_value(None);
		resize.set_value(None);
	});

	let context_init = context.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let graph = data.get();
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let mut slot = context_init.borrow_mut();
		let c = slot.get_or_insert_with(|| {
			let ctx: CanvasRenderingContext2d = canvas
				.get_context("2d")
				.unwrap()
				.unwrap()
				.dyn_into()
				.unwrap();
			let surface = surface_size(&window, &canvas, fullscreen, width, height);
			MindMapContext {
				state: MindMapState::new(config.clone(), surface),
				theme: Theme::default(),
				canvas: canvas.clone(),
				ctx,
			}
		});

		match source_error.and_then(|e| e.get()) {
			Some(message) => {
				c.state.clear();
				error.set(Some(message));
			}
			None => match c.state.load(&graph) {
				Ok(()) => error.set(None),
				Err(e) => error.set(Some(e.to_string())),
			},
		}
		// A new diagram starts with nothing selected.
		notify.send(&c.state, Some(InteractionEvent::SelectionChanged(None)));
		c.redraw();

		if timer.with_value(|t| t.is_none()) {
			let context_tick = context_init.clone();
			match AnimationTimer::start(c.state.config.animation.tick_interval_ms, move || {
				if let Some(ref mut c) = *context_tick.borrow_mut() {
					c.state.tick();
					c.redraw();
				}
			}) {
				Ok(t) => timer.set_value(Some(t)),
				Err(e) => warn!("mind-map: could not start animation timer: {:?}", e),
			}
		}

		if fullscreen && resize.with_value(|r| r.is_none()) {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			match WindowListener::add("resize", move || {
				let win: Window = web_sys::window().unwrap();
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					let surface = surface_size(&win, &canvas_resize, true, None, None);
					if c.state.resize(surface) {
						c.redraw();
					}
				}
			}) {
				Ok(listener) => resize.set_value(Some(listener)),
				Err(e) => warn!("mind-map: could not watch window resizes: {:?}", e),
			}
		}
	});

	if let Some(focus) = focus {
		let context_focus = context.clone();
		Effect::new(move |_| {
			let Some(id) = focus.get() else {
				return;
			};
			if let Some(ref mut c) = *context_focus.borrow_mut() {
				let event = c.state.center_on(&id);
				notify.send(&c.state, event);
				c.redraw();
			}
		});
	}

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let pos = local_position(canvas_ref, &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			let event = c.state.pointer_down(pos);
			notify.send(&c.state, event);
			c.redraw();
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let pos = local_position(canvas_ref, &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let event = c.state.pointer_move(pos);
			notify.send(&c.state, event);
			if c.state.view.is_dragging() || event.is_some() {
				c.redraw();
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up();
			c.redraw();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			let event = c.state.pointer_leave();
			notify.send(&c.state, event);
			c.redraw();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.wheel(ev.delta_y());
			c.redraw();
		}
	};

	let context_zi = context.clone();
	let zoom_in = move |_| {
		if let Some(ref mut c) = *context_zi.borrow_mut() {
			c.state.zoom_in();
			c.redraw();
		}
	};

	let context_zo = context.clone();
	let zoom_out = move |_| {
		if let Some(ref mut c) = *context_zo.borrow_mut() {
			c.state.zoom_out();
			c.redraw();
		}
	};

	let context_rs = context.clone();
	let reset = move |_| {
		if let Some(ref mut c) = *context_rs.borrow_mut() {
			let event = c.state.reset_view();
			notify.send(&c.state, event);
			c.redraw();
		}
	};

	view! {
		<div class="mind-map">
			{move || error.get().map(|e| view! { <div class="mind-map-error">{e}</div> })}
			<div class="mind-map-controls">
				<button on:click=zoom_in title="Zoom in">"+"</button>
				<button on:click=zoom_out title="Zoom out">"−"</button>
				<button on:click=reset title="Reset view">"Reset"</button>
			</div>
			<canvas
				node_ref=canvas_ref
				class="mind-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}
