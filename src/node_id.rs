//! Node identifier codec.
//!
//! Mesh nodes are addressed by a 24-bit integer. Forms and tables show the
//! canonical `N` + 6 uppercase hex digit form (`N00A1F3`); the backend stores
//! plain integers and occasionally hands out `0x`-prefixed strings.
//!
//! Every function here is total. They run inside field formatters on each
//! keystroke, so malformed input is passed through untouched or reported as a
//! validation failure, never a panic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Message attached to a field that does not hold a canonical node ID.
pub const INVALID_NODE_ID: &str = "Invalid node ID";

/// Width of the hex part of the canonical form.
const HEX_WIDTH: usize = 6;

/// Numeric identifier of a mesh node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
	/// Largest identifier representable in the canonical form.
	pub const MAX: NodeId = NodeId(0xFF_FFFF);
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "N{:06X}", self.0)
	}
}

impl From<u32> for NodeId {
	fn from(value: u32) -> Self {
		Self(value)
	}
}

/// A node identifier as it appears in a form field or on the wire: either a
/// number or free text the user is still typing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNodeId {
	/// Plain integer value.
	Number(u64),
	/// Any textual value, canonical or not.
	Text(String),
}

impl From<NodeId> for RawNodeId {
	fn from(id: NodeId) -> Self {
		RawNodeId::Number(id.0 as u64)
	}
}

impl From<&str> for RawNodeId {
	fn from(text: &str) -> Self {
		RawNodeId::Text(text.to_string())
	}
}

/// Renders a value in canonical display form.
///
/// Numbers and `0x`-prefixed strings are converted; any other text (including
/// an already canonical `N...` string or an empty field) is returned as is.
pub fn format_node_id(value: &RawNodeId) -> String {
	match value {
		RawNodeId::Number(n) => format!("N{:0width$X}", n, width = HEX_WIDTH),
		RawNodeId::Text(text) => match text.strip_prefix("0x") {
			Some(hex) => format!("N{:0>width$}", hex.to_uppercase(), width = HEX_WIDTH),
			None => text.clone(),
		},
	}
}

/// Converts canonical text back into its integer form.
///
/// Text starting with `N` whose remainder is valid hex becomes a number;
/// everything else comes back unchanged.
pub fn parse_node_id(text: &str) -> RawNodeId {
	text.strip_prefix('N')
		.filter(|hex| !hex.is_empty())
		.and_then(|hex| u64::from_str_radix(hex, 16).ok())
		.map(RawNodeId::Number)
		.unwrap_or_else(|| RawNodeId::Text(text.to_string()))
}

/// Field name to error message, as handed back to form validation.
pub type FieldErrors = BTreeMap<String, String>;

/// Checks that `text` is a canonical node ID: `N` followed by exactly six hex
/// digits. On failure the returned map holds [`INVALID_NODE_ID`] under
/// `field`.
pub fn validate_node_id(field: &str, text: &str) -> Result<NodeId, FieldErrors> {
	text.strip_prefix('N')
		.filter(|hex| hex.len() == HEX_WIDTH && hex.chars().all(|c| c.is_ascii_hexdigit()))
		.and_then(|hex| u32::from_str_radix(hex, 16).ok())
		.map(NodeId)
		.ok_or_else(|| {
			let mut errors = FieldErrors::new();
			errors.insert(field.to_string(), INVALID_NODE_ID.to_string());
			errors
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn formats_numbers_zero_padded() {
		assert_eq!(format_node_id(&RawNodeId::Number(0)), "N000000");
		assert_eq!(format_node_id(&RawNodeId::Number(0xA1F)), "N000A1F");
		assert_eq!(format_node_id(&RawNodeId::Number(0xFFFFFF)), "NFFFFFF");
	}

	#[test]
	fn formats_hex_prefixed_text() {
		assert_eq!(format_node_id(&"0xa1f".into()), "N000A1F");
		assert_eq!(format_node_id(&"0x00a1f3".into()), "N00A1F3");
	}

	#[test]
	fn format_passes_through_other_text() {
		assert_eq!(format_node_id(&"".into()), "");
		assert_eq!(format_node_id(&"N0003E8".into()), "N0003E8");
		assert_eq!(format_node_id(&"1000".into()), "1000");
	}

	#[test]
	fn parses_canonical_text() {
		assert_eq!(parse_node_id("N000A1F"), RawNodeId::Number(0xA1F));
		assert_eq!(parse_node_id("N3e8"), RawNodeId::Number(0x3E8));
	}

	#[test]
	fn parse_passes_through_other_text() {
		assert_eq!(parse_node_id("notanid"), RawNodeId::Text("notanid".into()));
		assert_eq!(parse_node_id(""), RawNodeId::Text("".into()));
		assert_eq!(parse_node_id("N"), RawNodeId::Text("N".into()));
		assert_eq!(parse_node_id("NXYZ"), RawNodeId::Text("NXYZ".into()));
	}

	#[test]
	fn parse_inverts_format_across_range() {
		for x in (0u64..=0xFF_FFFF).step_by(4099).chain([0xFF_FFFF]) {
			let text = format_node_id(&RawNodeId::Number(x));
			assert_eq!(parse_node_id(&text), RawNodeId::Number(x), "{text}");
		}
	}

	#[test]
	fn validates_canonical_ids() {
		assert_eq!(validate_node_id("id", "N0003E8"), Ok(NodeId(0x3E8)));
		assert_eq!(validate_node_id("id", "Nffffff"), Ok(NodeId::MAX));
	}

	#[test]
	fn rejects_malformed_ids() {
		for bad in ["N3E8", "NXXXXXX", "0003E8", "", "N0003E8F", "n0003E8"] {
			let errors = validate_node_id("ID", bad).unwrap_err();
			assert_eq!(errors.get("ID").map(String::as_str), Some(INVALID_NODE_ID), "{bad}");
		}
	}

	#[test]
	fn display_matches_canonical_form() {
		assert_eq!(NodeId(0x3E8).to_string(), "N0003E8");
		assert_eq!(NodeId(0x3E8).to_string(), format_node_id(&NodeId(0x3E8).into()));
	}

	#[test]
	fn raw_ids_deserialize_from_numbers_and_text() {
		let n: RawNodeId = serde_json::from_str("1000").unwrap();
		let t: RawNodeId = serde_json::from_str("\"0x3e8\"").unwrap();
		assert_eq!(n, RawNodeId::Number(1000));
		assert_eq!(format_node_id(&t), "N0003E8");
	}
}
