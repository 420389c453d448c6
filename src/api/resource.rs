//! Backend resource names.

use std::fmt;

/// A REST collection exposed by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
	/// Statically configured nodes.
	Nodes,
	/// Statically configured links.
	Links,
	/// Auto-discovered nodes.
	AutoNodes,
	/// Auto-discovered links.
	AutoLinks,
	/// ESPHome API servers.
	EsphomeServers,
	/// ESPHome client connections.
	EsphomeConnections,
	/// Neighbor table entries.
	Neighbors,
}

impl Resource {
	/// Every resource, in menu order.
	pub const ALL: [Resource; 7] = [
		Resource::Nodes,
		Resource::Links,
		Resource::AutoNodes,
		Resource::AutoLinks,
		Resource::EsphomeServers,
		Resource::EsphomeConnections,
		Resource::Neighbors,
	];

	/// URL path segment under the API base.
	pub fn path(self) -> &'static str {
		match self {
			Resource::Nodes => "nodes",
			Resource::Links => "links",
			Resource::AutoNodes => "autoNodes",
			Resource::AutoLinks => "autoLinks",
			Resource::EsphomeServers => "esphomeServers",
			Resource::EsphomeConnections => "esphomeConnections",
			Resource::Neighbors => "neighbors",
		}
	}

	/// Menu label.
	pub fn label(self) -> &'static str {
		match self {
			Resource::Nodes => "Static nodes",
			Resource::Links => "Static links",
			Resource::AutoNodes => "Dynamic nodes",
			Resource::AutoLinks => "Dynamic links",
			Resource::EsphomeServers => "EspHome Servers",
			Resource::EsphomeConnections => "EspHome Clients",
			Resource::Neighbors => "Neighbors",
		}
	}
}

impl fmt::Display for Resource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.path())
	}
}
