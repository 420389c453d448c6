//! Merges node and link collections into the renderer's graph data.

use super::color::derive_color;
use crate::api::{NetworkLink, NetworkNode};
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};

/// Shortest rendered link, for a weight of zero.
const BASE_LINK_DISTANCE: f64 = 10.0;
/// Extra length per unit of weight.
const LINK_DISTANCE_PER_WEIGHT: f64 = 100.0;

/// Builds the graph shown for one node/link snapshot. Order of both inputs
/// is preserved. The result is rebuilt from scratch on every call.
pub fn build_view_model(nodes: &[NetworkNode], links: &[NetworkLink]) -> GraphData {
	GraphData {
		nodes: nodes
			.iter()
			.map(|node| GraphNode {
				id: node.id,
				label: node.tag.clone(),
				color: derive_color(node).css().to_string(),
			})
			.collect(),
		links: links
			.iter()
			.map(|link| GraphLink {
				source: link.from,
				target: link.to,
				value: link.weight,
			})
			.collect(),
	}
}

/// Rest length of a rendered link: low-weight links are drawn short.
pub fn link_distance(value: f64) -> f64 {
	BASE_LINK_DISTANCE + value * LINK_DISTANCE_PER_WEIGHT
}

/// Hover text for a link.
pub fn link_label(value: f64) -> String {
	format!("{}%", (value * 100.0).round())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node_id::NodeId;
	use crate::topology::color::NodeColor;

	#[test]
	fn maps_nodes_and_links_in_order() {
		let nodes = vec![
			NetworkNode {
				id: NodeId(1),
				tag: "A".into(),
				in_use: true,
				..NetworkNode::default()
			},
			NetworkNode {
				id: NodeId(2),
				tag: "B".into(),
				in_use: false,
				..NetworkNode::default()
			},
		];
		let links = vec![NetworkLink {
			from: NodeId(1),
			to: NodeId(2),
			weight: 0.5,
			..NetworkLink::default()
		}];

		let graph = build_view_model(&nodes, &links);

		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[0].id, NodeId(1));
		assert_eq!(graph.nodes[0].label, "A");
		assert_eq!(graph.nodes[0].color, NodeColor::ActiveStandard.css());
		assert_eq!(graph.nodes[1].color, NodeColor::Inactive.css());
		assert_eq!(graph.links.len(), 1);
		assert_eq!(graph.links[0].source, NodeId(1));
		assert_eq!(graph.links[0].target, NodeId(2));
		assert_eq!(graph.links[0].value, 0.5);
	}

	#[test]
	fn empty_inputs_give_empty_graph() {
		let graph = build_view_model(&[], &[]);
		assert!(graph.nodes.is_empty());
		assert!(graph.links.is_empty());
	}

	#[test]
	fn link_distance_grows_with_weight() {
		assert_eq!(link_distance(0.0), 10.0);
		assert_eq!(link_distance(0.5), 60.0);
		assert_eq!(link_distance(1.0), 110.0);
	}

	#[test]
	fn link_label_is_a_percentage() {
		assert_eq!(link_label(0.5), "50%");
		assert_eq!(link_label(0.07), "7%");
	}
}
