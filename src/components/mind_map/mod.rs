//! Interactive mind map visualization component.
//!
//! Renders a tree-shaped diagram on an HTML canvas with:
//! - Breadth-first leveling and a level-based tree layout with overlap resolution
//! - Pan, zoom, hover and click-to-select interactions
//! - Smooth grow feedback for hovered and selected nodes on a fixed-rate timer
//! - Device-pixel-ratio aware rendering
//!
//! # Example
//!
//! ```ignore
//! use mind_map_canvas::{GraphData, MindMapCanvas};
//!
//! let data: GraphData = serde_json::from_str(r#"{
//!     "title": "Probability",
//!     "rootId": "p",
//!     "nodes": {
//!         "p": { "id": "p", "label": "Probability", "children": ["b"] },
//!         "b": { "id": "b", "label": "Bayes' rule", "children": [] }
//!     }
//! }"#)?;
//!
//! view! { <MindMapCanvas data=Signal::stored(data) fullscreen=true /> }
//! ```

pub mod animation;
mod component;
pub mod config;
pub mod graph;
pub mod interaction;
pub mod layout;
pub mod levels;
pub mod listener;
pub mod render;
pub mod state;
pub mod theme;
mod types;
pub mod viewport;

pub use component::MindMapCanvas;
pub use config::MindMapConfig;
pub use graph::{GraphError, MindMap, NodeIdx};
pub use theme::Theme;
pub use types::{GraphData, NodeData, NodeDetails};
