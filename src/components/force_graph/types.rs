//! Graph data structures for input to the force graph component.

use crate::node_id::NodeId;

/// A node in the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Mesh node this vertex stands for. Links reference it.
	pub id: NodeId,
	/// Text drawn next to the node.
	pub label: String,
	/// CSS color (`#rrggbb` or `rgb()`/`rgba()`).
	pub color: String,
}

/// A directed, weighted edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: NodeId,
	pub target: NodeId,
	/// Link quality in `[0, 1]`. Drives the rest length and the hover label.
	pub value: f64,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
