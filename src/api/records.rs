//! Typed records exchanged with the backend.
//!
//! Field names follow the backend JSON. Only `id`, `tag` and the state flags
//! feed the graph; the rest are display pass-through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::node_id::NodeId;

/// Hardware role of a mesh node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevType {
	/// Battery powered leaf device.
	Edge,
	/// Network coordinator.
	#[serde(alias = "coordinato")]
	Coordinator,
	/// Mains powered relay.
	Bridge,
	/// Anything the backend reports that this console does not know.
	#[default]
	#[serde(other)]
	Unknown,
}

impl DevType {
	/// Single letter shown in the node tables.
	pub fn abbreviation(self) -> &'static str {
		match self {
			DevType::Edge => "E",
			DevType::Coordinator => "C",
			_ => "B",
		}
	}
}

/// One mesh participant, static or discovered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
	pub id: NodeId,
	#[serde(default)]
	pub tag: String,
	#[serde(default)]
	pub is_local: bool,
	#[serde(default)]
	pub in_use: bool,
	#[serde(default)]
	pub deep_sleep: bool,
	#[serde(default)]
	pub dev_type: DevType,
	#[serde(default)]
	pub firmrev: String,
	#[serde(default)]
	pub libvers: String,
	#[serde(default)]
	pub comptime: String,
	#[serde(default)]
	pub last_seen: String,
	#[serde(default)]
	pub path: String,
}

/// Full dynamic node as returned by a single-record fetch, including the
/// remote information the backend queries from the device.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDetails {
	#[serde(flatten)]
	pub node: NetworkNode,
	/// Error text from the remote query, empty on success.
	#[serde(default)]
	pub error: String,
	#[serde(default)]
	pub dev_tag: String,
	#[serde(default)]
	pub channel: i8,
	#[serde(default)]
	pub tx_power: i8,
	#[serde(default)]
	pub groups: u8,
	#[serde(default)]
	pub revision: String,
	#[serde(default)]
	pub binded: u32,
	#[serde(default)]
	pub flags: u32,
}

impl NodeDetails {
	/// Bound server address as the console shows it (`0x` + uppercase hex).
	pub fn binded_display(&self) -> String {
		format!("0x{:X}", self.binded)
	}

	/// Remote query status line.
	pub fn error_display(&self) -> &str {
		if self.error.is_empty() {
			"No error"
		} else {
			&self.error
		}
	}
}

/// A weighted edge between two nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkLink {
	#[serde(default)]
	pub id: Value,
	pub from: NodeId,
	pub to: NodeId,
	#[serde(default)]
	pub weight: f64,
}

impl NetworkLink {
	/// Weight in percent, as shown and edited in forms.
	pub fn weight_percent(&self) -> f64 {
		weight_to_percent(self.weight)
	}
}

/// Converts a stored link weight to the percent value shown in forms.
pub fn weight_to_percent(weight: f64) -> f64 {
	(weight * 100.0).round()
}

/// Converts a percent value typed in a form to the stored fraction.
pub fn percent_to_weight(percent: f64) -> f64 {
	(percent / 100.0).clamp(0.0, 1.0)
}

/// Path segment addressing a record whose `id` the console does not
/// interpret. Strings are used as is, anything else in its JSON form.
pub fn record_key(id: &Value) -> String {
	match id {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Payload for creating a static node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeInput {
	pub id: NodeId,
	pub tag: String,
	pub in_use: bool,
}

/// Payload for updating a node's editable fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeUpdate {
	pub tag: String,
	pub in_use: bool,
}

/// Payload for creating or updating a static link.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkInput {
	pub from: NodeId,
	pub to: NodeId,
	pub weight: f64,
}

/// ESPHome server or client connection. The console only lists these, so the
/// fields beyond `id` are kept as they arrive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EsphomeRecord {
	pub id: Value,
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}

impl EsphomeRecord {
	/// Column names in a stable order, `id` excluded.
	pub fn columns(records: &[EsphomeRecord]) -> Vec<String> {
		let mut columns: Vec<String> = Vec::new();
		for record in records {
			for key in record.fields.keys() {
				if !columns.contains(key) {
					columns.push(key.clone());
				}
			}
		}
		columns
	}

	/// Text for one cell; strings unquoted, missing fields empty.
	pub fn cell(&self, column: &str) -> String {
		match self.fields.get(column) {
			None | Some(Value::Null) => String::new(),
			Some(Value::String(s)) => s.clone(),
			Some(other) => other.to_string(),
		}
	}
}

/// Response of the `hello` endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hello {
	pub program_name: String,
	#[serde(default)]
	pub program_description: String,
	pub program_revision: String,
}

/// Response body of command endpoints, success or failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandReply {
	#[serde(default)]
	pub message: String,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn node_defaults_missing_state_fields() {
		let node: NetworkNode = serde_json::from_value(json!({ "id": 1, "tag": "A" })).unwrap();
		assert_eq!(node.id, NodeId(1));
		assert!(!node.in_use);
		assert!(!node.is_local);
		assert!(!node.deep_sleep);
		assert_eq!(node.dev_type, DevType::Unknown);
	}

	#[test]
	fn node_requires_id() {
		assert!(serde_json::from_value::<NetworkNode>(json!({ "tag": "A" })).is_err());
	}

	#[test]
	fn dev_type_parses_known_and_unknown_values() {
		let parse = |s: &str| serde_json::from_value::<DevType>(json!(s)).unwrap();
		assert_eq!(parse("edge"), DevType::Edge);
		assert_eq!(parse("coordinator"), DevType::Coordinator);
		assert_eq!(parse("coordinato"), DevType::Coordinator);
		assert_eq!(parse("bridge"), DevType::Bridge);
		assert_eq!(parse("toaster"), DevType::Unknown);
		assert_eq!(DevType::Unknown.abbreviation(), "B");
	}

	#[test]
	fn details_flatten_node_fields() {
		let details: NodeDetails = serde_json::from_value(json!({
			"id": 0x3e8,
			"tag": "kitchen",
			"dev_type": "edge",
			"error": "",
			"binded": 0x1a2b,
			"channel": 6
		}))
		.unwrap();
		assert_eq!(details.node.tag, "kitchen");
		assert_eq!(details.node.dev_type, DevType::Edge);
		assert_eq!(details.binded_display(), "0x1A2B");
		assert_eq!(details.error_display(), "No error");
		assert_eq!(details.channel, 6);
	}

	#[test]
	fn link_weight_percent_conversions() {
		let link: NetworkLink =
			serde_json::from_value(json!({ "id": 4, "from": 1, "to": 2, "weight": 0.35 })).unwrap();
		assert_eq!(link.weight_percent(), 35.0);
		assert_eq!(percent_to_weight(35.0), 0.35);
		assert_eq!(percent_to_weight(150.0), 1.0);
	}

	#[test]
	fn record_keys_unquote_strings() {
		assert_eq!(record_key(&json!(17)), "17");
		assert_eq!(record_key(&json!("1-2")), "1-2");
	}

	#[test]
	fn esphome_records_collect_columns_in_order() {
		let records: Vec<EsphomeRecord> = serde_json::from_value(json!([
			{ "id": 1, "address": "10.0.0.2", "port": 6053 },
			{ "id": 2, "address": "10.0.0.3", "node": 1000 }
		]))
		.unwrap();
		assert_eq!(EsphomeRecord::columns(&records), ["address", "port", "node"]);
		assert_eq!(records[0].cell("port"), "6053");
		assert_eq!(records[0].cell("address"), "10.0.0.2");
		assert_eq!(records[1].cell("port"), "");
	}
}
