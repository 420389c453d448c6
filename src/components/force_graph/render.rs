//! Canvas rendering for the force graph.
//!
//! Drawing happens in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Link lines and arrows (world space)
//! 3. Dimmed nodes, then highlighted nodes on top
//! 4. Percentage labels on highlighted links

use std::f64::consts::PI;

use force_graph::Node;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::{Color, Theme};
use crate::topology::link_label;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) -> Result<(), JsValue> {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme)?;

	ctx.save();
	let drawn = draw_world(state, ctx, &scale, theme);
	ctx.restore();
	drawn
}

fn draw_world(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) -> Result<(), JsValue> {
	ctx.translate(state.transform.x, state.transform.y)?;
	ctx.scale(state.transform.k, state.transform.k)?;

	let mut edge_result = Ok(());
	state.graph.visit_edges(|n1, n2, _| {
		if edge_result.is_ok() {
			edge_result = draw_edge(state, ctx, scale, theme, n1, n2);
		}
	});
	edge_result?;
	ctx.set_line_dash(&js_sys::Array::new())?;

	draw_nodes(state, ctx, scale, theme)?;
	draw_link_labels(state, ctx, scale, theme)
}

fn draw_background(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
) -> Result<(), JsValue> {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let gradient = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8)?;
	gradient.add_color_stop(0.0, &theme.background.color_center.to_css())?;
	gradient.add_color_stop(1.0, &theme.background.color.to_css())?;
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	if theme.background.vignette > 0.0 {
		let vignette = ctx.create_radial_gradient(
			cx,
			cy,
			state.width.min(state.height) * 0.3,
			cx,
			cy,
			state.width.max(state.height) * 0.7,
		)?;
		vignette.add_color_stop(0.0, "rgba(0, 0, 0, 0)")?;
		vignette.add_color_stop(1.0, &Color::rgba(0, 0, 0, theme.background.vignette).to_css())?;
		#[allow(deprecated)]
		ctx.set_fill_style(&vignette);
		ctx.fill_rect(0.0, 0.0, state.width, state.height);
	}
	Ok(())
}

/// Link alpha and width factor given its own and the global highlight.
fn edge_emphasis(edge_t: f64, max_t: f64) -> (f64, f64) {
	if edge_t > 0.01 {
		(0.7 + 0.3 * edge_t, 1.0 + 0.4 * edge_t)
	} else if max_t > 0.01 {
		(0.7 - 0.5 * max_t, 1.0 - 0.3 * max_t)
	} else {
		(0.7, 1.0)
	}
}

fn draw_edge(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	n1: &Node<NodeInfo>,
	n2: &Node<NodeInfo>,
) -> Result<(), JsValue> {
	let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return Ok(());
	}

	let edge_t = smooth_step(state.highlight.edge_intensity(n1.index(), n2.index()));
	let max_t = smooth_step(state.highlight.max_intensity());
	let (alpha, width_factor) = edge_emphasis(edge_t, max_t);
	let color = theme.edge.color;

	ctx.set_stroke_style_str(&color.with_alpha(alpha * color.a).to_css());
	ctx.set_line_width(scale.line_width * width_factor);

	// Dashes flow from source to target.
	ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(8.0),
		&JsValue::from_f64(4.0),
	))?;
	ctx.set_line_dash_offset(-state.flow_time * 12.0);

	let (ux, uy) = (dx / dist, dy / dist);
	let r1 = scale.node_radius * n1.data.user_data.size;
	let r2 = scale.node_radius * n2.data.user_data.size;
	ctx.begin_path();
	ctx.move_to(x1 + ux * r1, y1 + uy * r1);
	ctx.line_to(x2 - ux * (r2 + scale.arrow_size), y2 - uy * (r2 + scale.arrow_size));
	ctx.stroke();

	let arrow_alpha = alpha * scale.arrow_alpha;
	if arrow_alpha > 0.05 {
		ctx.set_line_dash(&js_sys::Array::new())?;
		ctx.set_fill_style_str(&color.with_alpha(arrow_alpha * color.a).to_css());
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
		let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	Ok(())
}

/// Whether a node with this highlight intensity is drawn in the front pass.
/// Every node lands in exactly one of the two node passes.
fn in_front(intensity: f64) -> bool {
	intensity > 0.01
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) -> Result<(), JsValue> {
	let max_t = smooth_step(state.highlight.max_intensity());
	let mut result = Ok(());

	// Dimmed pass first so highlighted nodes land on top.
	state.graph.visit_nodes(|node| {
		let t = state.highlight.node_intensity(node.index());
		if result.is_ok() && !in_front(t) {
			result = draw_node(ctx, node, scale, theme, 1.0 - 0.6 * max_t, 1.0 - 0.15 * max_t);
		}
	});
	std::mem::replace(&mut result, Ok(()))?;

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let intensity = state.highlight.node_intensity(idx);
		if result.is_err() || !in_front(intensity) {
			return;
		}
		let t = smooth_step(intensity);
		result = draw_node(ctx, node, scale, theme, 1.0, 1.0 + 0.25 * t);

		let ring_t = smooth_step(state.highlight.hover_ring_intensity(idx));
		if result.is_ok() && ring_t > 0.01 {
			let radius = scale.node_radius * node.data.user_data.size * (1.0 + 0.25 * t);
			ctx.begin_path();
			result = ctx.arc(
				node.x() as f64,
				node.y() as f64,
				radius + scale.ring_offset,
				0.0,
				2.0 * PI,
			);
			ctx.set_stroke_style_str(&theme.node.ring_color.with_alpha(0.8 * ring_t).to_css());
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}
	});
	result
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) -> Result<(), JsValue> {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let info = &node.data.user_data;
	let radius = scale.node_radius * radius_mult * info.size;

	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	ctx.arc(x, y, radius, 0.0, 2.0 * PI)?;
	if theme.node.use_gradient {
		let base = Color::parse(&info.color);
		let gradient = ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)?;
		gradient.add_color_stop(0.0, &base.lighten(0.4).to_css())?;
		gradient.add_color_stop(0.7, &base.to_css())?;
		gradient.add_color_stop(1.0, &base.darken(0.2).to_css())?;
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&info.color);
	}
	ctx.fill();

	if !info.label.is_empty() && alpha > 0.5 {
		ctx.set_fill_style_str(&theme.node.label_color.to_css());
		ctx.set_font(&scale.label_font);
		ctx.fill_text(&info.label, x + radius + 4.0, y + 3.0)?;
	}
	ctx.set_global_alpha(1.0);
	Ok(())
}

/// Draws the weight percentage at the midpoint of each highlighted link.
fn draw_link_labels(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) -> Result<(), JsValue> {
	let mut result = Ok(());
	ctx.set_font(&scale.label_font);
	state.graph.visit_edges(|n1, n2, _| {
		let t = smooth_step(state.highlight.edge_intensity(n1.index(), n2.index()));
		if result.is_err() || t < 0.5 {
			return;
		}
		let Some(value) = state.edge_value(n1.index(), n2.index()) else {
			return;
		};
		let text = link_label(value);
		let (mx, my) = (
			(n1.x() as f64 + n2.x() as f64) / 2.0,
			(n1.y() as f64 + n2.y() as f64) / 2.0,
		);
		result = ctx.measure_text(&text).and_then(|metrics| {
			let pad = 2.0 / scale.k;
			let height = scale.label_px + pad * 2.0;
			ctx.set_global_alpha(t);
			ctx.set_fill_style_str(&theme.edge.label_background.to_css());
			ctx.fill_rect(
				mx - metrics.width() / 2.0 - pad,
				my - height / 2.0,
				metrics.width() + pad * 2.0,
				height,
			);
			ctx.set_fill_style_str(&theme.edge.label_color.to_css());
			let filled = ctx.fill_text(&text, mx - metrics.width() / 2.0, my + height / 4.0);
			ctx.set_global_alpha(1.0);
			filled
		});
	});
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn highlighted_links_brighten_and_others_dim() {
		assert_eq!(edge_emphasis(0.0, 0.0), (0.7, 1.0));
		let (lit, lit_w) = edge_emphasis(1.0, 1.0);
		let (dim, dim_w) = edge_emphasis(0.0, 1.0);
		assert!(lit > 0.7 && lit_w > 1.0);
		assert!(dim < 0.7 && dim_w < 1.0);
	}

	#[test]
	fn each_node_is_drawn_in_one_pass() {
		// Eased intensity stays tiny here, yet the node must not vanish.
		assert!(smooth_step(0.05) <= 0.01);
		assert!(in_front(0.05));
		assert!(!in_front(0.0));
		assert!(!in_front(0.01));
	}

	#[test]
	fn smooth_step_is_anchored_at_the_ends() {
		assert_eq!(smooth_step(0.0), 0.0);
		assert_eq!(smooth_step(1.0), 1.0);
		assert_eq!(smooth_step(0.5), 0.5);
	}
}
