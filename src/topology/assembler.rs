//! Two-stage fetch state machine feeding the topology graph.
//!
//! The assembler performs no I/O itself. It hands out [`FetchRequest`]s and
//! is fed their completions; the graph page runs the requests and forwards
//! the results. Each request carries a [`FetchTicket`] naming the activation
//! that issued it, so a response that arrives after the user switched
//! networks is recognised and dropped.
//!
//! ```text
//! Idle -> AwaitingNodes -> AwaitingLinks -> Ready
//!   ^__________ activate / refresh restarts from any state __|
//! ```

use std::fmt;

use log::{debug, info, warn};

use super::view_model::build_view_model;
use crate::api::{ApiError, NetworkLink, NetworkNode, Resource};
use crate::components::force_graph::GraphData;

/// Which node/link resource pair the graph shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NetworkVariant {
	/// Auto-discovered network.
	#[default]
	Dynamic,
	/// Manually configured network.
	Static,
}

impl NetworkVariant {
	/// Both variants, in selector order.
	pub const ALL: [NetworkVariant; 2] = [NetworkVariant::Dynamic, NetworkVariant::Static];

	/// Resource holding this variant's nodes.
	pub fn nodes_resource(self) -> Resource {
		match self {
			NetworkVariant::Dynamic => Resource::AutoNodes,
			NetworkVariant::Static => Resource::Nodes,
		}
	}

	/// Resource holding this variant's links.
	pub fn links_resource(self) -> Resource {
		match self {
			NetworkVariant::Dynamic => Resource::AutoLinks,
			NetworkVariant::Static => Resource::Links,
		}
	}

	/// Selector label.
	pub fn label(self) -> &'static str {
		match self {
			NetworkVariant::Dynamic => "Dynamic network",
			NetworkVariant::Static => "Static network",
		}
	}

	/// Stable key used as the selector option value.
	pub fn key(self) -> &'static str {
		match self {
			NetworkVariant::Dynamic => "dynamic",
			NetworkVariant::Static => "static",
		}
	}

	/// Inverse of [`NetworkVariant::key`].
	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|v| v.key() == key)
	}
}

/// Identifies the activation a fetch belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
	generation: u64,
	variant: NetworkVariant,
}

impl FetchTicket {
	/// Network variant the fetch was issued for.
	pub fn variant(&self) -> NetworkVariant {
		self.variant
	}
}

/// Which half of the graph a request loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchKind {
	Nodes,
	Links,
}

/// A fetch the caller must run and report back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchRequest {
	pub ticket: FetchTicket,
	pub kind: FetchKind,
	pub resource: Resource,
}

/// Where the assembler is in its cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AssemblerState {
	/// Nothing requested yet.
	#[default]
	Idle,
	/// Node fetch in flight.
	AwaitingNodes,
	/// Nodes known, link fetch in flight.
	AwaitingLinks { nodes: Vec<NetworkNode> },
	/// View model published.
	Ready,
}

impl fmt::Display for AssemblerState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AssemblerState::Idle => f.write_str("idle"),
			AssemblerState::AwaitingNodes => f.write_str("awaiting nodes"),
			AssemblerState::AwaitingLinks { nodes } => {
				write!(f, "awaiting links for {} nodes", nodes.len())
			}
			AssemblerState::Ready => f.write_str("ready"),
		}
	}
}

/// Holds the node, link and view-model state of one mounted graph view.
#[derive(Debug, Default)]
pub struct GraphAssembler {
	state: AssemblerState,
	variant: Option<NetworkVariant>,
	generation: u64,
	view: Option<GraphData>,
	last_error: Option<ApiError>,
}

impl GraphAssembler {
	/// Assembler in the idle state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current state.
	pub fn state(&self) -> &AssemblerState {
		&self.state
	}

	/// Variant of the current activation, if any.
	pub fn variant(&self) -> Option<NetworkVariant> {
		self.variant
	}

	/// Latest published view model. Cleared when a new activation starts.
	pub fn view(&self) -> Option<&GraphData> {
		self.view.as_ref()
	}

	/// Failure of the most recent fetch in the current activation.
	pub fn last_error(&self) -> Option<&ApiError> {
		self.last_error.as_ref()
	}

	/// Starts a fresh cycle for `variant`, dropping the previous view model
	/// and invalidating every outstanding ticket.
	pub fn activate(&mut self, variant: NetworkVariant) -> FetchRequest {
		self.generation += 1;
		self.variant = Some(variant);
		self.view = None;
		self.last_error = None;
		self.state = AssemblerState::AwaitingNodes;
		debug!(
			"meshmesh-admin: graph activation {} for {:?}",
			self.generation, variant
		);
		FetchRequest {
			ticket: self.ticket(variant),
			kind: FetchKind::Nodes,
			resource: variant.nodes_resource(),
		}
	}

	/// Restarts the cycle for the current variant after an external data
	/// change. Does nothing before the first activation.
	pub fn refresh(&mut self) -> Option<FetchRequest> {
		let variant = self.variant?;
		Some(self.activate(variant))
	}

	/// Feeds a node fetch completion. Returns the link fetch to issue next.
	pub fn nodes_loaded(
		&mut self,
		ticket: FetchTicket,
		result: Result<Vec<NetworkNode>, ApiError>,
	) -> Option<FetchRequest> {
		if !self.accepts(ticket, FetchKind::Nodes) {
			return None;
		}
		match result {
			Ok(nodes) => {
				info!(
					"meshmesh-admin: loaded {} nodes from {}",
					nodes.len(),
					ticket.variant.nodes_resource()
				);
				self.state = AssemblerState::AwaitingLinks { nodes };
				Some(FetchRequest {
					ticket,
					kind: FetchKind::Links,
					resource: ticket.variant.links_resource(),
				})
			}
			Err(err) => {
				warn!("meshmesh-admin: node fetch failed: {}", err);
				self.last_error = Some(err);
				None
			}
		}
	}

	/// Feeds a link fetch completion. Returns the new view model when one was
	/// published.
	pub fn links_loaded(
		&mut self,
		ticket: FetchTicket,
		result: Result<Vec<NetworkLink>, ApiError>,
	) -> Option<&GraphData> {
		if !self.accepts(ticket, FetchKind::Links) {
			return None;
		}
		let links = match result {
			Ok(links) => links,
			Err(err) => {
				warn!("meshmesh-admin: link fetch failed: {}", err);
				self.last_error = Some(err);
				return None;
			}
		};
		let AssemblerState::AwaitingLinks { nodes } = std::mem::take(&mut self.state) else {
			return None;
		};
		let view = build_view_model(&nodes, &links);
		info!(
			"meshmesh-admin: graph ready with {} nodes, {} links",
			view.nodes.len(),
			view.links.len()
		);
		self.state = AssemblerState::Ready;
		self.view = Some(view);
		self.view.as_ref()
	}

	fn ticket(&self, variant: NetworkVariant) -> FetchTicket {
		FetchTicket {
			generation: self.generation,
			variant,
		}
	}

	/// A completion is only applied when it belongs to the live activation
	/// and matches the fetch the state machine is waiting for.
	fn accepts(&self, ticket: FetchTicket, kind: FetchKind) -> bool {
		if ticket.generation != self.generation || Some(ticket.variant) != self.variant {
			debug!(
				"meshmesh-admin: dropping stale {:?} response for {:?}",
				kind, ticket.variant
			);
			return false;
		}
		let expected = match self.state {
			AssemblerState::AwaitingNodes => Some(FetchKind::Nodes),
			AssemblerState::AwaitingLinks { .. } => Some(FetchKind::Links),
			AssemblerState::Idle | AssemblerState::Ready => None,
		};
		if expected != Some(kind) {
			debug!(
				"meshmesh-admin: ignoring {:?} response while {}",
				kind, self.state
			);
			return false;
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node_id::NodeId;

	fn node(id: u32, tag: &str) -> NetworkNode {
		NetworkNode {
			id: NodeId(id),
			tag: tag.into(),
			in_use: true,
			..NetworkNode::default()
		}
	}

	fn link(from: u32, to: u32, weight: f64) -> NetworkLink {
		NetworkLink {
			from: NodeId(from),
			to: NodeId(to),
			weight,
			..NetworkLink::default()
		}
	}

	#[test]
	fn starts_idle() {
		let assembler = GraphAssembler::new();
		assert_eq!(assembler.state(), &AssemblerState::Idle);
		assert!(assembler.view().is_none());
		assert!(assembler.variant().is_none());
	}

	#[test]
	fn fetches_links_only_after_nodes() {
		let mut assembler = GraphAssembler::new();
		let nodes_req = assembler.activate(NetworkVariant::Dynamic);
		assert_eq!(nodes_req.kind, FetchKind::Nodes);
		assert_eq!(nodes_req.resource, Resource::AutoNodes);
		assert_eq!(assembler.state(), &AssemblerState::AwaitingNodes);

		// A link completion before nodes are known is not accepted.
		assert!(
			assembler
				.links_loaded(nodes_req.ticket, Ok(vec![link(1, 1, 0.5)]))
				.is_none()
		);
		assert_eq!(assembler.state(), &AssemblerState::AwaitingNodes);

		let links_req = assembler
			.nodes_loaded(nodes_req.ticket, Ok(vec![node(1, "A")]))
			.expect("link fetch issued");
		assert_eq!(links_req.kind, FetchKind::Links);
		assert_eq!(links_req.resource, Resource::AutoLinks);

		let view = assembler
			.links_loaded(links_req.ticket, Ok(vec![link(1, 1, 0.5)]))
			.expect("view published")
			.clone();
		assert_eq!(view.nodes.len(), 1);
		assert_eq!(view.nodes[0].id, NodeId(1));
		assert_eq!(view.nodes[0].label, "A");
		assert_eq!(view.links.len(), 1);
		assert_eq!(view.links[0].source, NodeId(1));
		assert_eq!(view.links[0].target, NodeId(1));
		assert_eq!(view.links[0].value, 0.5);
		assert_eq!(assembler.state(), &AssemblerState::Ready);
	}

	#[test]
	fn static_variant_uses_configured_resources() {
		let mut assembler = GraphAssembler::new();
		let req = assembler.activate(NetworkVariant::Static);
		assert_eq!(req.resource, Resource::Nodes);
		let req = assembler.nodes_loaded(req.ticket, Ok(vec![])).unwrap();
		assert_eq!(req.resource, Resource::Links);
	}

	#[test]
	fn stale_node_response_is_dropped_after_switch() {
		let mut assembler = GraphAssembler::new();
		let dynamic = assembler.activate(NetworkVariant::Dynamic);
		let fresh = assembler.activate(NetworkVariant::Static);

		assert!(
			assembler
				.nodes_loaded(dynamic.ticket, Ok(vec![node(9, "stale")]))
				.is_none()
		);
		assert_eq!(assembler.state(), &AssemblerState::AwaitingNodes);

		let links = assembler
			.nodes_loaded(fresh.ticket, Ok(vec![node(1, "static")]))
			.unwrap();
		let view = assembler.links_loaded(links.ticket, Ok(vec![])).unwrap();
		assert_eq!(view.nodes.len(), 1);
		assert_eq!(view.nodes[0].label, "static");
	}

	#[test]
	fn stale_response_does_not_overwrite_rendered_view() {
		let mut assembler = GraphAssembler::new();
		let dynamic = assembler.activate(NetworkVariant::Dynamic);
		let dynamic_links = assembler
			.nodes_loaded(dynamic.ticket, Ok(vec![node(9, "stale")]))
			.unwrap();

		let fresh = assembler.activate(NetworkVariant::Static);
		let links = assembler
			.nodes_loaded(fresh.ticket, Ok(vec![node(1, "static")]))
			.unwrap();
		assert!(assembler.links_loaded(links.ticket, Ok(vec![])).is_some());

		assert!(
			assembler
				.links_loaded(dynamic_links.ticket, Ok(vec![link(9, 9, 1.0)]))
				.is_none()
		);
		let view = assembler.view().unwrap();
		assert_eq!(view.nodes[0].label, "static");
		assert!(view.links.is_empty());
	}

	#[test]
	fn same_variant_reactivation_invalidates_old_tickets() {
		let mut assembler = GraphAssembler::new();
		let first = assembler.activate(NetworkVariant::Dynamic);
		let _second = assembler.refresh().unwrap();
		assert!(assembler.nodes_loaded(first.ticket, Ok(vec![])).is_none());
	}

	#[test]
	fn empty_collections_publish_empty_view() {
		let mut assembler = GraphAssembler::new();
		let req = assembler.activate(NetworkVariant::Dynamic);
		let req = assembler.nodes_loaded(req.ticket, Ok(vec![node(1, "A")])).unwrap();
		assembler.links_loaded(req.ticket, Ok(vec![])).unwrap();
		assert_eq!(assembler.view().unwrap().nodes.len(), 1);

		let req = assembler.refresh().unwrap();
		assert!(assembler.view().is_none());
		let req = assembler
			.nodes_loaded(req.ticket, Ok(vec![]))
			.expect("link fetch still issued for empty nodes");
		let view = assembler.links_loaded(req.ticket, Ok(vec![])).unwrap();
		assert!(view.nodes.is_empty());
		assert!(view.links.is_empty());
	}

	#[test]
	fn failures_never_publish_partial_graphs() {
		let mut assembler = GraphAssembler::new();
		let req = assembler.activate(NetworkVariant::Dynamic);
		let err = ApiError::Network("offline".into());
		assert!(assembler.nodes_loaded(req.ticket, Err(err.clone())).is_none());
		assert_eq!(assembler.last_error(), Some(&err));
		assert_eq!(assembler.state(), &AssemblerState::AwaitingNodes);
		assert!(assembler.view().is_none());

		let links = assembler.nodes_loaded(req.ticket, Ok(vec![node(1, "A")])).unwrap();
		assert!(assembler.links_loaded(links.ticket, Err(err)).is_none());
		assert!(assembler.view().is_none());
		assert!(matches!(
			assembler.state(),
			AssemblerState::AwaitingLinks { .. }
		));
	}

	#[test]
	fn refresh_before_activation_is_a_no_op() {
		let mut assembler = GraphAssembler::new();
		assert!(assembler.refresh().is_none());
		assert_eq!(assembler.state(), &AssemblerState::Idle);
	}

	#[test]
	fn variant_keys_round_trip() {
		for v in NetworkVariant::ALL {
			assert_eq!(NetworkVariant::from_key(v.key()), Some(v));
		}
		assert_eq!(NetworkVariant::from_key("other"), None);
	}
}
