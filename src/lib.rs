//! mind-map-canvas: Interactive mind map visualization for study notes.
//!
//! This crate provides a WASM-based canvas component that lays out a
//! tree-shaped diagram level by level and renders it with pan/zoom, hover
//! and selection feedback.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::mind_map::{
	GraphData, GraphError, MindMapCanvas, MindMapConfig, NodeData, NodeDetails, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("mind-map: logging initialized");
}

/// Text of the `<script>` element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Parse the JSON text of the `<script>` element with the given id.
fn load_script_json<T: DeserializeOwned>(id: &str) -> Option<T> {
	serde_json::from_str::<T>(&script_text(id)?)
		.inspect_err(|e| warn!("mind-map: failed to parse #{}: {}", id, e))
		.ok()
}

/// Parse a diagram description.
/// Expected format: JSON with { title, rootId, nodes: { id: {...} } }
///
/// The error is the message shown in place of the diagram.
pub fn parse_graph_data(json_text: &str) -> Result<GraphData, String> {
	match serde_json::from_str::<GraphData>(json_text) {
		Ok(data) => {
			info!(
				"mind-map: read \"{}\" with {} nodes",
				data.title,
				data.nodes.as_ref().map_or(0, |n| n.len())
			);
			Ok(data)
		}
		Err(e) => {
			warn!("mind-map: failed to parse graph data: {}", e);
			Err(format!("could not parse diagram: {}", e))
		}
	}
}

/// Load the diagram from a script element with id="mind-map-data".
fn load_graph_data() -> Result<GraphData, String> {
	let json_text = script_text("mind-map-data")
		.ok_or_else(|| "no diagram found in #mind-map-data".to_string())?;
	parse_graph_data(&json_text)
}

/// Load optional tuning from a script element with id="mind-map-config".
fn load_config() -> MindMapConfig {
	match load_script_json::<MindMapConfig>("mind-map-config") {
		Some(config) => {
			info!("mind-map: using config overrides");
			config
		}
		None => MindMapConfig::default(),
	}
}

/// Main application component.
/// Loads the diagram from the DOM and renders it fullscreen with a details panel.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let (graph_data, load_error) = match load_graph_data() {
		Ok(data) => (data, None),
		Err(message) => (GraphData::default(), Some(message)),
	};
	let title = if graph_data.title.is_empty() {
		"Mind Map".to_string()
	} else {
		graph_data.title.clone()
	};
	let root_id = graph_data.root_id.clone();
	let graph_signal = Signal::derive(move || graph_data.clone());

	let (selected, set_selected) = signal(None::<NodeDetails>);
	let (hovered, set_hovered) = signal(None::<NodeDetails>);
	let focus = RwSignal::new(None::<String>);

	// Hover previews take precedence over the pinned selection.
	let shown = move || hovered.get().or_else(|| selected.get());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text=title.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-mind-map">
			<MindMapCanvas
				data=graph_signal
				fullscreen=true
				config=load_config()
				source_error=Signal::derive(move || load_error.clone())
				focus=focus
				on_select=Callback::new(move |d| set_selected.set(d))
				on_hover=Callback::new(move |d| set_hovered.set(d))
			/>
			<div class="mind-map-overlay">
				<h1>{title}</h1>
				<p class="subtitle">"Click a topic to select it. Scroll to zoom. Drag to pan."</p>
				<button on:click=move |_| focus.set(root_id.clone())>"Center on root"</button>
			</div>
			{move || {
				shown()
					.map(|d| {
						view! {
							<aside class="mind-map-details">
								<h2>{d.label}</h2>
								{d.description.map(|text| view! { <p>{text}</p> })}
							</aside>
						}
					})
			}}
		</div>
	}
}
