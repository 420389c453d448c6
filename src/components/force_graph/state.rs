//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, view
//! transforms for pan/zoom, and highlight state for hover effects with smooth
//! intensity transitions. Link lengths are pulled towards the distance implied
//! by each link's weight after every physics step.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::types::GraphData;
use crate::node_id::NodeId;
use crate::topology::link_distance;

/// Fraction of the rest-length error corrected per tick.
const LINK_STRENGTH: f64 = 0.1;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub color: String,
	/// Size multiplier (1.0 = normal, >1.0 = better connected)
	pub size: f64,
}

/// A simulated link with the weight it was built from.
#[derive(Clone, Copy, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub value: f64,
	pub distance: f64,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Per-node highlight intensities that ease towards the hover target.
///
/// Hovering a node targets it and its direct neighbors. Intensities fade in
/// and out with exponential smoothing, and a short hold time keeps a node lit
/// when the pointer only grazes its hit area.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<DefaultNodeIdx>,
	target_set: HashSet<DefaultNodeIdx>,
	node_intensity: HashMap<DefaultNodeIdx, f64>,
	hover_ring_intensity: HashMap<DefaultNodeIdx, f64>,
	hold_timer: HashMap<DefaultNodeIdx, f64>,
	cached_max: f64,
}

/// Seconds a highlight is held before it may fade.
const MIN_HOLD_TIME: f64 = 0.12;

impl HighlightState {
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>, edges: &[EdgeInfo]) {
		if self.hovered_node == node {
			return;
		}

		self.hovered_node = node;
		self.target_set.clear();

		if let Some(idx) = node {
			self.target_set.insert(idx);
			for edge in edges {
				if edge.source == idx {
					self.target_set.insert(edge.target);
				} else if edge.target == idx {
					self.target_set.insert(edge.source);
				}
			}
			for &idx in &self.target_set {
				self.hold_timer.insert(idx, MIN_HOLD_TIME);
			}
		}
	}

	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in;
		}
		if let Some(idx) = self.hovered_node {
			let intensity = self.hover_ring_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in;
		}

		let target_set = &self.target_set;
		self.hold_timer.retain(|idx, timer| {
			if target_set.contains(idx) {
				return true;
			}
			*timer -= dt;
			*timer > 0.0
		});

		let hold_timer = &self.hold_timer;
		let held = |idx: &DefaultNodeIdx| hold_timer.get(idx).copied().unwrap_or(0.0) > 0.0;

		let mut new_max: f64 = 0.0;
		self.node_intensity.retain(|idx, intensity| {
			if !target_set.contains(idx) && !held(idx) {
				*intensity *= fade_out;
			}
			new_max = new_max.max(*intensity);
			target_set.contains(idx) || *intensity > 0.005
		});

		let hovered = self.hovered_node;
		self.hover_ring_intensity.retain(|idx, intensity| {
			if hovered == Some(*idx) {
				return true;
			}
			if !held(idx) {
				*intensity *= fade_out;
			}
			*intensity > 0.005
		});

		self.cached_max = new_max;
	}

	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	pub fn hover_ring_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.hover_ring_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, idx1: DefaultNodeIdx, idx2: DefaultNodeIdx) -> f64 {
		(self.node_intensity(idx1) * self.node_intensity(idx2)).sqrt()
	}

	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Displacement that moves two endpoints `p1`, `p2` a `strength` fraction of
/// the way towards being `rest` apart. Returns the offset for `p1`; `p2` moves
/// by the negation. Coincident points are left alone.
pub fn spring_correction(p1: (f64, f64), p2: (f64, f64), rest: f64, strength: f64) -> (f64, f64) {
	let (dx, dy) = (p2.0 - p1.0, p2.1 - p1.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 1e-6 {
		return (0.0, 0.0);
	}
	let stretch = (dist - rest) / dist * strength * 0.5;
	(dx * stretch, dy * stretch)
}

/// Physics simulation plus interaction state for one graph snapshot.
///
/// Built from a [`GraphData`] and replaced wholesale when new data arrives;
/// the animation loop calls [`ForceGraphState::tick`] once per frame.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<EdgeInfo>,
	edge_values: HashMap<(DefaultNodeIdx, DefaultNodeIdx), f64>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();

		let mut link_counts: HashMap<NodeId, usize> = HashMap::new();
		for link in data.links.iter().filter(|l| l.source != l.target) {
			*link_counts.entry(link.source).or_insert(0) += 1;
			*link_counts.entry(link.target).or_insert(0) += 1;
		}
		let max_links = link_counts.values().copied().max().unwrap_or(1).max(1);

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = ((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32);
			let degree = link_counts.get(&node.id).copied().unwrap_or(0);
			let size = 1.0 + 0.6 * (degree as f64 / max_links as f64).sqrt();

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id,
					label: node.label.clone(),
					color: node.color.clone(),
					size,
				},
			});
			id_to_idx.insert(node.id, idx);
		}

		let mut edges = Vec::new();
		let mut edge_values = HashMap::new();
		for link in &data.links {
			// Self links carry no layout information and would collapse the
			// spring force onto a single point.
			if link.source == link.target {
				continue;
			}
			if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push(EdgeInfo {
					source: src,
					target: tgt,
					value: link.value,
					distance: link_distance(link.value),
				});
				edge_values.insert((src, tgt), link.value);
			}
		}

		Self {
			graph,
			edges,
			edge_values,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	/// Weight of the link drawn from `source` to `target`.
	pub fn edge_value(&self, source: DefaultNodeIdx, target: DefaultNodeIdx) -> Option<f64> {
		self.edge_values.get(&(source, target)).copied()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius * node.data.user_data.size {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	/// Grabs the node under the pointer, or starts panning the view.
	pub fn pointer_down(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		let Some(idx) = self.node_at_position(sx, sy, config) else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
			return;
		};
		let mut origin = (0.0, 0.0);
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				origin = (node.x(), node.y());
			}
		});
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: origin.0,
			node_start_y: origin.1,
		};
	}

	/// Follows the pointer: moves a grabbed node (pinning it), pans, or
	/// updates the hover target.
	pub fn pointer_move(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			let k = self.transform.k;
			let x = self.drag.node_start_x + ((sx - self.drag.start_x) / k) as f32;
			let y = self.drag.node_start_y + ((sy - self.drag.start_y) / k) as f32;
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = x;
					node.data.y = y;
					node.data.is_anchor = true;
				}
			});
			return;
		}
		let hovered = self.node_at_position(sx, sy, config);
		self.set_hover(hovered);
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Releases any drag or pan. Dragged nodes stay pinned.
	pub fn pointer_up(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	/// Pointer left the canvas.
	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	/// Zooms one wheel step about the screen point, which stays fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.apply_link_distances();
		self.flow_time += dt as f64;
		self.highlight.tick(dt as f64);
	}

	/// Nudges every linked pair towards its weight-derived rest length.
	fn apply_link_distances(&mut self) {
		if self.edges.is_empty() {
			return;
		}
		let mut positions = HashMap::new();
		let mut anchored = HashSet::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
			if node.data.is_anchor {
				anchored.insert(node.index());
			}
		});

		let mut offsets: HashMap<DefaultNodeIdx, (f64, f64)> = HashMap::new();
		for edge in &self.edges {
			let (Some(&p1), Some(&p2)) = (positions.get(&edge.source), positions.get(&edge.target))
			else {
				continue;
			};
			let (ox, oy) = spring_correction(p1, p2, edge.distance, LINK_STRENGTH);
			let src = offsets.entry(edge.source).or_insert((0.0, 0.0));
			src.0 += ox;
			src.1 += oy;
			let tgt = offsets.entry(edge.target).or_insert((0.0, 0.0));
			tgt.0 -= ox;
			tgt.1 -= oy;
		}

		self.graph.visit_nodes_mut(|node| {
			if anchored.contains(&node.index()) {
				return;
			}
			if let Some(&(ox, oy)) = offsets.get(&node.index()) {
				node.data.x += ox as f32;
				node.data.y += oy as f32;
			}
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	#[test]
	fn stretched_link_pulls_endpoints_together() {
		let (ox, oy) = spring_correction((0.0, 0.0), (100.0, 0.0), 60.0, 1.0);
		assert_eq!((ox, oy), (20.0, 0.0));
	}

	#[test]
	fn compressed_link_pushes_endpoints_apart() {
		let (ox, _) = spring_correction((0.0, 0.0), (10.0, 0.0), 110.0, 1.0);
		assert_eq!(ox, -50.0);
	}

	#[test]
	fn link_at_rest_is_untouched() {
		assert_eq!(spring_correction((0.0, 0.0), (0.0, 60.0), 60.0, 0.5), (0.0, 0.0));
		assert_eq!(spring_correction((5.0, 5.0), (5.0, 5.0), 60.0, 0.5), (0.0, 0.0));
	}

	#[test]
	fn highlight_targets_hovered_node_and_neighbors() {
		let data = GraphData {
			nodes: (1..=3)
				.map(|i| GraphNode {
					id: NodeId(i),
					label: format!("n{i}"),
					color: "#808080".into(),
				})
				.collect(),
			links: vec![GraphLink {
				source: NodeId(1),
				target: NodeId(2),
				value: 0.5,
			}],
		};
		let mut state = ForceGraphState::new(&data, 800.0, 600.0);
		let idx = index_by_id(&state);
		let (a, b, c) = (idx[&NodeId(1)], idx[&NodeId(2)], idx[&NodeId(3)]);

		state.set_hover(Some(a));
		state.highlight.tick(0.5);
		assert!(state.highlight.node_intensity(a) > 0.9);
		assert!(state.highlight.node_intensity(b) > 0.9);
		assert_eq!(state.highlight.node_intensity(c), 0.0);
		assert!(state.highlight.edge_intensity(a, b) > 0.9);

		state.set_hover(None);
		for _ in 0..200 {
			state.highlight.tick(0.05);
		}
		assert_eq!(state.highlight.node_intensity(a), 0.0);
		assert_eq!(state.highlight.max_intensity(), 0.0);
	}

	#[test]
	fn builds_edges_with_weight_distances_and_skips_self_links() {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: NodeId(1),
					label: "A".into(),
					color: "#ffd700".into(),
				},
				GraphNode {
					id: NodeId(2),
					label: "B".into(),
					color: "#2e8b57".into(),
				},
			],
			links: vec![
				GraphLink {
					source: NodeId(1),
					target: NodeId(1),
					value: 0.5,
				},
				GraphLink {
					source: NodeId(1),
					target: NodeId(2),
					value: 0.25,
				},
				GraphLink {
					source: NodeId(2),
					target: NodeId(7),
					value: 1.0,
				},
			],
		};
		let state = ForceGraphState::new(&data, 800.0, 600.0);
		let idx = index_by_id(&state);

		assert_eq!(state.edges.len(), 1);
		assert_eq!(state.edges[0].distance, 35.0);
		assert_eq!(state.edge_value(idx[&NodeId(1)], idx[&NodeId(2)]), Some(0.25));
		assert_eq!(state.edge_value(idx[&NodeId(2)], idx[&NodeId(1)]), None);
	}

	fn two_nodes() -> ForceGraphState {
		let data = GraphData {
			nodes: (1..=2)
				.map(|i| GraphNode {
					id: NodeId(i),
					label: String::new(),
					color: "#2e8b57".into(),
				})
				.collect(),
			links: Vec::new(),
		};
		ForceGraphState::new(&data, 800.0, 600.0)
	}

	fn position(state: &ForceGraphState, idx: DefaultNodeIdx) -> (f32, f32) {
		let mut pos = (0.0, 0.0);
		state.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = (node.x(), node.y());
			}
		});
		pos
	}

	#[test]
	fn zoom_keeps_the_cursor_point_fixed() {
		let mut state = two_nodes();
		let before = state.screen_to_graph(300.0, 200.0);
		state.zoom_at(300.0, 200.0, true);
		let after = state.screen_to_graph(300.0, 200.0);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, false);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn dragging_background_pans_the_view() {
		let config = ScaleConfig::default();
		let mut state = two_nodes();
		// Far corner of the canvas, away from the nodes on the unit circle.
		state.pointer_down(5.0, 5.0, &config);
		assert!(state.pan.active);
		state.pointer_move(25.0, 15.0, &config);
		assert_eq!((state.transform.x, state.transform.y), (420.0, 310.0));
		state.pointer_up();
		assert!(!state.pan.active);
	}

	#[test]
	fn dragging_a_node_pins_it_under_the_pointer() {
		let config = ScaleConfig::default();
		let mut state = two_nodes();
		let idx = index_by_id(&state)[&NodeId(1)];
		let (nx, ny) = position(&state, idx);
		let (sx, sy) = (nx as f64 + state.transform.x, ny as f64 + state.transform.y);

		state.pointer_down(sx, sy, &config);
		assert_eq!(state.drag.node_idx, Some(idx));
		state.pointer_move(sx + 30.0, sy - 10.0, &config);
		assert_eq!(position(&state, idx), (nx + 30.0, ny - 10.0));

		state.pointer_leave();
		assert!(!state.drag.active);
		state.graph.visit_nodes(|node| {
			if node.index() == idx {
				assert!(node.data.is_anchor);
			}
		});
	}

	fn index_by_id(state: &ForceGraphState) -> HashMap<NodeId, DefaultNodeIdx> {
		let mut map = HashMap::new();
		state.graph.visit_nodes(|node| {
			map.insert(node.data.user_data.id, node.index());
		});
		map
	}
}
