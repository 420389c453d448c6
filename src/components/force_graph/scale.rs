//! Zoom-dependent sizing.
//!
//! Sizes live in one of two spaces. World-space values are drawn after the
//! canvas transform and grow as the user zooms in; screen-space values are
//! divided by the zoom factor `k` so they keep a fixed pixel size.

/// How one size reacts to zoom.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Fixed pixel size.
	Screen,
	/// World-space size kept within `min_screen..=max_screen` pixels.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space size for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Tunable base sizes.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node_radius: f64,
	pub node_behavior: ScaleBehavior,
	pub hit_radius: f64,
	/// Font size in pixels for node and link labels.
	pub label_size: f64,
	/// Below this zoom labels stop shrinking.
	pub label_min_k: f64,
	/// Link line width in pixels.
	pub line_width: f64,
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	/// Hover ring width and offset in pixels.
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 5.0,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			hit_radius: 12.0,
			label_size: 10.0,
			label_min_k: 0.5,
			line_width: 1.5,
			arrow_size: 5.0,
			arrow_behavior: ScaleBehavior::Clamped {
				min_screen: 0.0,
				max_screen: 18.0,
			},
			ring_width: 1.5,
			ring_offset: 2.0,
		}
	}
}

/// Sizes resolved for the current zoom, computed once per frame. All values
/// are world-space.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	/// Label font size in world units.
	pub label_px: f64,
	pub label_font: String,
	pub line_width: f64,
	pub arrow_size: f64,
	/// Arrows fade out as the view zooms out past 1.0.
	pub arrow_alpha: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_px = config.label_size / k.max(config.label_min_k);
		Self {
			k,
			node_radius: config.node_behavior.apply(config.node_radius, k),
			hit_radius: config.node_behavior.apply(config.hit_radius, k),
			label_px,
			label_font: format!("{}px sans-serif", label_px),
			line_width: ScaleBehavior::Screen.apply(config.line_width, k),
			arrow_size: config.arrow_behavior.apply(config.arrow_size, k),
			arrow_alpha: k.clamp(0.0, 1.0),
			ring_width: ScaleBehavior::Screen.apply(config.ring_width, k),
			ring_offset: ScaleBehavior::Screen.apply(config.ring_offset, k),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_sizes_counter_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(2.0, 2.0), 1.0);
		assert_eq!(ScaleBehavior::Screen.apply(2.0, 0.5), 4.0);
	}

	#[test]
	fn clamped_sizes_respect_pixel_bounds() {
		let b = ScaleBehavior::Clamped {
			min_screen: 5.0,
			max_screen: 20.0,
		};
		// Zoomed far out the node would vanish; keep it at 5px.
		assert_eq!(b.apply(5.0, 0.1), 50.0);
		// Zoomed far in it would swamp the view; cap at 20px.
		assert_eq!(b.apply(5.0, 10.0), 2.0);
		assert_eq!(b.apply(5.0, 1.0), 5.0);
	}

	#[test]
	fn labels_stop_shrinking_at_min_zoom() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 0.1).label_font, "20px sans-serif");
		assert_eq!(ScaledValues::new(&config, 2.0).label_font, "5px sans-serif");
	}
}
