//! Canvas rendering for the mind map.
//!
//! Stateless: every call redraws the whole frame from the layout, levels,
//! view state and animation state. Passes, in order:
//! 1. Clear and fill the background (device pixels)
//! 2. Edges with arrowheads (world space)
//! 3. Node boxes, accents, labels and child indicators (world space)

use web_sys::CanvasRenderingContext2d;

use super::config::LayoutConfig;
use super::graph::NodeIdx;
use super::layout::Point;
use super::state::{MindMapState, Scene};
use super::theme::{Color, Theme};
use super::viewport::ViewState;

/// Cubic Bezier from a parent's bottom-center to a child's top-center, with
/// both control points on the vertical midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCurve {
	pub start: Point,
	pub c1: Point,
	pub c2: Point,
	pub end: Point,
}

impl EdgeCurve {
	pub fn between(parent: Point, child: Point, config: &LayoutConfig) -> Self {
		let start = Point::new(parent.x + config.node_width / 2.0, parent.y + config.node_height);
		let end = Point::new(child.x + config.node_width / 2.0, child.y);
		let mid_y = (start.y + end.y) / 2.0;
		Self {
			start,
			c1: Point::new(start.x, mid_y),
			c2: Point::new(end.x, mid_y),
			end,
		}
	}

	pub fn point_at(&self, t: f64) -> Point {
		let u = 1.0 - t;
		let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
		Point::new(
			a * self.start.x + b * self.c1.x + c * self.c2.x + d * self.end.x,
			a * self.start.y + b * self.c1.y + c * self.c2.y + d * self.end.y,
		)
	}

	/// Unit direction of travel at `t`.
	pub fn direction_at(&self, t: f64) -> Point {
		let u = 1.0 - t;
		let (a, b, c) = (3.0 * u * u, 6.0 * u * t, 3.0 * t * t);
		let dx = a * (self.c1.x - self.start.x) + b * (self.c2.x - self.c1.x) + c * (self.end.x - self.c2.x);
		let dy = a * (self.c1.y - self.start.y) + b * (self.c2.y - self.c1.y) + c * (self.end.y - self.c2.y);
		let len = (dx * dx + dy * dy).sqrt();
		if len < 1e-9 {
			Point::new(0.0, 1.0)
		} else {
			Point::new(dx / len, dy / len)
		}
	}
}

/// Strip lightweight markup from a label for plain canvas text: emphasis and
/// code markers, heading hashes and `$` math delimiters.
pub fn plain_label(label: &str) -> String {
	let text = label.trim_start().trim_start_matches('#');
	text.chars()
		.filter(|c| !matches!(c, '*' | '`' | '$'))
		.collect::<String>()
		.split_whitespace()
		.collect::<Vec<_>>()
		.join(" ")
}

/// Word-wrap `text` into at most `max_lines` lines no wider than `max_width`.
///
/// Text that does not fit is cut with an ellipsis on the last line. A single
/// word wider than the box is ellipsized on its own line.
pub fn wrap_label(
	text: &str,
	max_width: f64,
	max_lines: usize,
	measure: impl Fn(&str) -> f64,
) -> Vec<String> {
	let max_lines = max_lines.max(1);
	let mut lines: Vec<String> = Vec::new();
	let mut current = String::new();
	let mut overflow = false;

	for word in text.split_whitespace() {
		let candidate = if current.is_empty() {
			word.to_string()
		} else {
			format!("{} {}", current, word)
		};
		if current.is_empty() || measure(&candidate) <= max_width {
			current = candidate;
			continue;
		}
		if lines.len() + 1 == max_lines {
			overflow = true;
			break;
		}
		lines.push(std::mem::replace(&mut current, word.to_string()));
	}
	if !current.is_empty() {
		lines.push(current);
	}

	if overflow {
		if let Some(last) = lines.last_mut() {
			*last = ellipsize(last, max_width, &measure);
		}
	}
	for line in &mut lines {
		if measure(line) > max_width {
			*line = ellipsize(line, max_width, &measure);
		}
	}
	lines
}

fn ellipsize(line: &str, max_width: f64, measure: &impl Fn(&str) -> f64) -> String {
	let mut chars: Vec<char> = line.chars().collect();
	loop {
		let candidate = format!("{}…", chars.iter().collect::<String>().trim_end());
		if chars.is_empty() || measure(&candidate) <= max_width {
			return candidate;
		}
		chars.pop();
	}
}

/// Box of a node drawn at `scale`, kept centered on its base box.
pub fn scaled_box(pos: Point, scale: f64, config: &LayoutConfig) -> (f64, f64, f64, f64) {
	let (w, h) = (config.node_width * scale, config.node_height * scale);
	(
		pos.x - (w - config.node_width) / 2.0,
		pos.y - (h - config.node_height) / 2.0,
		w,
		h,
	)
}

fn is_active(idx: NodeIdx, view: &ViewState) -> bool {
	view.hovered == Some(idx) || view.selected == Some(idx)
}

/// Renders the complete mind map to the canvas.
pub fn render(state: &MindMapState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (backing_w, backing_h) = state.backing_size();
	let surface = state.surface();

	ctx.save();
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.clear_rect(0.0, 0.0, backing_w as f64, backing_h as f64);
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, backing_w as f64, backing_h as f64);

	if let Some(scene) = &state.scene {
		let view = &state.view;
		let _ = ctx.scale(surface.device_pixel_ratio, surface.device_pixel_ratio);
		let _ = ctx.translate(view.offset.x, view.offset.y);
		let _ = ctx.scale(view.scale, view.scale);

		draw_edges(scene, view, ctx, &state.config.layout, theme);
		draw_nodes(state, scene, ctx, theme);
	}

	ctx.restore();
}

fn draw_edges(
	scene: &Scene,
	view: &ViewState,
	ctx: &CanvasRenderingContext2d,
	config: &LayoutConfig,
	theme: &Theme,
) {
	ctx.set_line_cap("round");

	for (parent, parent_pos) in scene.layout.iter() {
		let color = theme.palette.get(scene.levels.get(parent).unwrap_or(0));

		for &child in scene.graph.children_of(parent) {
			let Some(child_pos) = scene.layout.position(child) else {
				continue;
			};
			let curve = EdgeCurve::between(parent_pos, child_pos, config);
			let active = is_active(parent, view) || is_active(child, view);
			draw_edge(ctx, &curve, color, active, theme);
		}
	}

	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_color("transparent");
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	curve: &EdgeCurve,
	color: Color,
	active: bool,
	theme: &Theme,
) {
	let css = color.to_css();
	if active {
		ctx.set_line_width(theme.edge.active_width);
		ctx.set_shadow_color(&css);
		ctx.set_shadow_blur(theme.edge.glow_blur);
	} else {
		ctx.set_line_width(theme.edge.width);
		ctx.set_shadow_color("transparent");
		ctx.set_shadow_blur(0.0);
	}
	ctx.set_stroke_style_str(&css);

	ctx.begin_path();
	ctx.move_to(curve.start.x, curve.start.y);
	ctx.bezier_curve_to(
		curve.c1.x, curve.c1.y, curve.c2.x, curve.c2.y, curve.end.x, curve.end.y,
	);
	ctx.stroke();

	let tip = curve.point_at(theme.edge.arrow_t);
	let dir = curve.direction_at(theme.edge.arrow_t);
	let size = theme.edge.arrow_size;
	let (back_x, back_y) = (tip.x - dir.x * size, tip.y - dir.y * size);
	let (px, py) = (-dir.y * size * 0.5, dir.x * size * 0.5);

	ctx.set_fill_style_str(&css);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(state: &MindMapState, scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let config = &state.config.layout;
	let breathing = state.anim.breathing(&state.config.animation);

	for (idx, pos) in scene.layout.iter() {
		let Some(node) = scene.graph.node(idx) else {
			continue;
		};
		let color = theme.palette.get(scene.levels.get(idx).unwrap_or(0));
		let (x, y, w, h) = scaled_box(pos, state.anim.scale(idx), config);
		let active = is_active(idx, &state.view);
		let selected = state.view.selected == Some(idx);
		let style = &theme.node;

		// Body with drop shadow.
		ctx.save();
		let mut blur = if active {
			style.active_shadow_blur
		} else {
			style.shadow_blur
		};
		if selected {
			blur += style.breathing_blur * (breathing + 1.0) / 2.0;
		}
		ctx.set_shadow_color(&style.shadow_color.to_css());
		ctx.set_shadow_blur(blur);
		ctx.set_shadow_offset_y(if active { 4.0 } else { 2.0 });

		let gradient = ctx.create_linear_gradient(x, y, x, y + h);
		let _ = gradient.add_color_stop(0.0, "#ffffff");
		let _ = gradient.add_color_stop(1.0, &color.lighten(style.tint_lightness).to_css());
		rounded_rect(ctx, x, y, w, h, style.corner_radius);
		ctx.set_fill_style_canvas_gradient(&gradient);
		ctx.fill();
		ctx.restore();

		// Border.
		rounded_rect(ctx, x, y, w, h, style.corner_radius);
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(if active {
			style.active_border_width
		} else {
			style.border_width
		});
		ctx.stroke();

		// Top accent, clipped to the rounded corners.
		ctx.save();
		rounded_rect(ctx, x, y, w, h, style.corner_radius);
		ctx.clip();
		ctx.set_fill_style_str(&color.to_css());
		ctx.fill_rect(x, y, w, style.accent_width);
		ctx.restore();

		draw_label(ctx, &node.label, x, y, w, h, state.anim.scale(idx), theme);

		if !node.children.is_empty() {
			draw_chevron(ctx, x + w / 2.0, y + h - style.chevron_size - 3.0, style.chevron_size, color);
		}
	}
}

#[allow(clippy::too_many_arguments)]
fn draw_label(
	ctx: &CanvasRenderingContext2d,
	label: &str,
	x: f64,
	y: f64,
	w: f64,
	h: f64,
	scale: f64,
	theme: &Theme,
) {
	let style = &theme.node;
	let line_height = style.line_height * scale;
	let padding = style.label_padding * scale;
	let max_lines = ((h - 2.0 * padding) / line_height).floor().max(1.0) as usize;

	ctx.set_font(&format!("{}px {}", style.font_size * scale, style.font_family));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(&style.label_color.to_css());

	let lines = wrap_label(&plain_label(label), w - 2.0 * padding, max_lines, |text| {
		ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
	});
	let top = y + h / 2.0 - (lines.len() as f64 * line_height) / 2.0 + line_height / 2.0;
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x + w / 2.0, top + i as f64 * line_height);
	}
}

fn draw_chevron(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, size: f64, color: Color) {
	ctx.begin_path();
	ctx.move_to(cx - size, cy - size / 2.0);
	ctx.line_to(cx, cy + size / 2.0);
	ctx.line_to(cx + size, cy - size / 2.0);
	ctx.set_stroke_style_str(&color.with_alpha(0.8).to_css());
	ctx.set_line_width(1.5);
	ctx.stroke();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
