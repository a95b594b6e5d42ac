//! Visual theming for the mind map.
//!
//! Provides the per-level color palette and the node/edge style constants.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fixed palette indexed by tree level.
#[derive(Clone, Debug)]
pub struct LevelPalette {
	pub colors: [Color; 6],
}

impl LevelPalette {
	pub fn study() -> Self {
		Self {
			colors: [
				Color::rgb(79, 70, 229),  // Indigo
				Color::rgb(14, 165, 233), // Sky
				Color::rgb(16, 185, 129), // Emerald
				Color::rgb(245, 158, 11), // Amber
				Color::rgb(239, 68, 68),  // Red
				Color::rgb(168, 85, 247), // Purple
			],
		}
	}

	/// Color for nodes at `level` and edges leaving them.
	pub fn get(&self, level: usize) -> Color {
		self.colors[level % self.colors.len()]
	}
}

/// Node box style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub corner_radius: f64,
	/// Lighten factor for the gradient's bottom stop (1.0 = white).
	pub tint_lightness: f64,
	pub accent_width: f64,
	pub border_width: f64,
	pub active_border_width: f64,
	pub shadow_color: Color,
	pub shadow_blur: f64,
	pub active_shadow_blur: f64,
	/// Extra blur on the selected node at the peak of the breathing cycle.
	pub breathing_blur: f64,
	pub label_color: Color,
	pub font_size: f64,
	pub font_family: &'static str,
	pub line_height: f64,
	pub label_padding: f64,
	pub chevron_size: f64,
}

/// Edge style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub width: f64,
	pub active_width: f64,
	pub glow_blur: f64,
	pub arrow_size: f64,
	/// Bezier parameter where the arrowhead sits.
	pub arrow_t: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: Color,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
	pub palette: LevelPalette,
}

impl Theme {
	/// Light study-notes theme (default)
	pub fn light() -> Self {
		Self {
			name: "light",
			background: Color::rgb(248, 250, 252),
			node: NodeStyle {
				corner_radius: 10.0,
				tint_lightness: 0.85,
				accent_width: 3.0,
				border_width: 1.5,
				active_border_width: 3.0,
				shadow_color: Color::rgba(15, 23, 42, 0.18),
				shadow_blur: 6.0,
				active_shadow_blur: 16.0,
				breathing_blur: 4.0,
				label_color: Color::rgb(30, 41, 59),
				font_size: 14.0,
				font_family: "sans-serif",
				line_height: 17.0,
				label_padding: 10.0,
				chevron_size: 5.0,
			},
			edge: EdgeStyle {
				width: 2.0,
				active_width: 3.5,
				glow_blur: 10.0,
				arrow_size: 8.0,
				arrow_t: 0.8,
			},
			palette: LevelPalette::study(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_wraps_by_level() {
		let palette = LevelPalette::study();
		assert_eq!(palette.get(0), palette.get(6));
		assert_eq!(palette.get(4), palette.get(10));
		assert_ne!(palette.get(0), palette.get(1));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(79, 70, 229).to_css(), "#4f46e5");
		assert_eq!(
			Color::rgb(0, 0, 0).with_alpha(0.5).to_css(),
			"rgba(0, 0, 0, 0.5)"
		);
		assert_eq!(Color::rgb(0, 100, 255).lighten(1.0), Color::rgb(255, 255, 255));
	}
}
