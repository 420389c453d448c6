//! Node color policy for the topology view.

use crate::api::{DevType, NetworkNode};

/// Visual state of a node in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeColor {
	/// The console's own device.
	Local,
	/// Configured but not in use.
	Inactive,
	/// Edge device in deep sleep, which is its normal duty cycle.
	SleepingEdge,
	/// Non-edge device in deep sleep.
	SleepingWarning,
	/// Awake edge device.
	ActiveEdge,
	/// Awake coordinator, bridge or unknown device.
	ActiveStandard,
}

impl NodeColor {
	/// CSS color handed to the renderer.
	pub fn css(self) -> &'static str {
		match self {
			NodeColor::Local => "#ffd700",
			NodeColor::Inactive => "#808080",
			NodeColor::SleepingEdge => "#008b8b",
			NodeColor::SleepingWarning => "#ff0000",
			NodeColor::ActiveEdge => "#00ffff",
			NodeColor::ActiveStandard => "#2e8b57",
		}
	}
}

/// Picks the color for `node`. First match wins; the sleep checks must run
/// before the plain edge check.
pub fn derive_color(node: &NetworkNode) -> NodeColor {
	let is_edge = node.dev_type == DevType::Edge;
	if node.is_local {
		NodeColor::Local
	} else if !node.in_use {
		NodeColor::Inactive
	} else if node.deep_sleep && is_edge {
		NodeColor::SleepingEdge
	} else if node.deep_sleep {
		NodeColor::SleepingWarning
	} else if is_edge {
		NodeColor::ActiveEdge
	} else {
		NodeColor::ActiveStandard
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node_id::NodeId;

	fn node(id: u32) -> NetworkNode {
		NetworkNode {
			id: NodeId(id),
			in_use: true,
			..NetworkNode::default()
		}
	}

	#[test]
	fn precedence_follows_state_flags() {
		let local = NetworkNode {
			is_local: true,
			..node(1)
		};
		let unused = NetworkNode {
			in_use: false,
			..node(2)
		};
		let sleeping_edge = NetworkNode {
			deep_sleep: true,
			dev_type: DevType::Edge,
			..node(3)
		};
		let colors: Vec<_> = [local, unused, sleeping_edge].iter().map(derive_color).collect();
		assert_eq!(
			colors,
			[NodeColor::Local, NodeColor::Inactive, NodeColor::SleepingEdge]
		);
	}

	#[test]
	fn local_wins_over_everything() {
		let n = NetworkNode {
			is_local: true,
			in_use: false,
			deep_sleep: true,
			dev_type: DevType::Edge,
			..node(1)
		};
		assert_eq!(derive_color(&n), NodeColor::Local);
	}

	#[test]
	fn node_without_in_use_is_inactive() {
		let n: NetworkNode = serde_json::from_value(serde_json::json!({ "id": 2, "tag": "B" }))
			.unwrap();
		assert_eq!(derive_color(&n), NodeColor::Inactive);
	}

	#[test]
	fn inactive_wins_over_sleep() {
		let n = NetworkNode {
			in_use: false,
			deep_sleep: true,
			..node(1)
		};
		assert_eq!(derive_color(&n), NodeColor::Inactive);
	}

	#[test]
	fn sleeping_non_edge_is_a_warning() {
		for dev_type in [DevType::Coordinator, DevType::Bridge, DevType::Unknown] {
			let n = NetworkNode {
				deep_sleep: true,
				dev_type,
				..node(1)
			};
			assert_eq!(derive_color(&n), NodeColor::SleepingWarning);
		}
	}

	#[test]
	fn awake_devices_by_type() {
		let edge = NetworkNode {
			dev_type: DevType::Edge,
			..node(1)
		};
		let bridge = NetworkNode {
			dev_type: DevType::Bridge,
			..node(2)
		};
		assert_eq!(derive_color(&edge), NodeColor::ActiveEdge);
		assert_eq!(derive_color(&bridge), NodeColor::ActiveStandard);
		assert_eq!(NodeColor::ActiveStandard.css(), "#2e8b57");
	}
}
