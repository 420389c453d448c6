//! Runtime configuration read from the host page.
//!
//! The page may embed a `<script id="app-config" type="application/json">`
//! element. Every field is optional; a missing element or malformed JSON
//! falls back to defaults.

use log::{Level, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Id of the script element holding the configuration JSON.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Path appended to the page location when no API base is configured.
const DEFAULT_API_PATH: &str = "api/v1";

/// Console settings, shared through Leptos context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Root of the REST API, without a trailing slash.
	pub api_base: String,
	/// Most verbose level sent to the browser console.
	pub log_level: Level,
	/// Rows per page in resource tables.
	pub list_page_size: usize,
}

/// Raw shape of the embedded JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	api_base: Option<String>,
	log_level: Option<String>,
	list_page_size: Option<usize>,
}

impl AppConfig {
	/// Defaults for a page served from `pathname`.
	pub fn with_pathname(pathname: &str) -> Self {
		Self {
			api_base: default_api_base(pathname),
			log_level: Level::Debug,
			list_page_size: 25,
		}
	}

	/// Parses the embedded JSON on top of the defaults for `pathname`.
	/// Unknown log levels and a zero page size keep their defaults.
	pub fn parse(json: &str, pathname: &str) -> Result<Self, serde_json::Error> {
		let raw: RawConfig = serde_json::from_str(json)?;
		let mut config = Self::with_pathname(pathname);
		if let Some(base) = raw.api_base.filter(|b| !b.trim().is_empty()) {
			config.api_base = base.trim_end_matches('/').to_string();
		}
		if let Some(level) = raw.log_level.and_then(|l| l.parse().ok()) {
			config.log_level = level;
		}
		if let Some(size) = raw.list_page_size.filter(|s| *s > 0) {
			config.list_page_size = size;
		}
		Ok(config)
	}

	/// Reads the configuration from the current document. Call after
	/// logging is initialized so parse failures reach the console.
	pub fn load() -> Self {
		let window = web_sys::window();
		let pathname = window
			.as_ref()
			.and_then(|w| w.location().pathname().ok())
			.unwrap_or_else(|| "/".to_string());

		let Some(json) = window.as_ref().and_then(config_text) else {
			return Self::with_pathname(&pathname);
		};
		match Self::parse(&json, &pathname) {
			Ok(config) => config,
			Err(e) => {
				warn!("meshmesh-admin: failed to parse app config: {}", e);
				Self::with_pathname(&pathname)
			}
		}
	}
}

fn config_text(window: &Window) -> Option<String> {
	let element = window.document()?.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// `pathname` joined with the API path, with exactly one slash between them.
fn default_api_base(pathname: &str) -> String {
	format!("{}/{}", pathname.trim_end_matches('/'), DEFAULT_API_PATH)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn api_base_follows_page_location() {
		assert_eq!(default_api_base("/"), "/api/v1");
		assert_eq!(default_api_base(""), "/api/v1");
		assert_eq!(default_api_base("/console/"), "/console/api/v1");
		assert_eq!(default_api_base("/console"), "/console/api/v1");
	}

	#[test]
	fn empty_object_yields_defaults() {
		let config = AppConfig::parse("{}", "/").unwrap();
		assert_eq!(config, AppConfig::with_pathname("/"));
		assert_eq!(config.log_level, Level::Debug);
		assert_eq!(config.list_page_size, 25);
	}

	#[test]
	fn explicit_values_override_defaults() {
		let json = serde_json::json!({
			"api_base": "http://mesh.local:4040/api/v1/",
			"log_level": "warn",
			"list_page_size": 50,
		})
		.to_string();
		let config = AppConfig::parse(&json, "/").unwrap();
		assert_eq!(config.api_base, "http://mesh.local:4040/api/v1");
		assert_eq!(config.log_level, Level::Warn);
		assert_eq!(config.list_page_size, 50);
	}

	#[test]
	fn bad_values_keep_defaults() {
		let json = r#"{"log_level": "loud", "list_page_size": 0, "api_base": "  "}"#;
		let config = AppConfig::parse(json, "/ui/").unwrap();
		assert_eq!(config, AppConfig::with_pathname("/ui/"));
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(AppConfig::parse("{", "/").is_err());
	}
}
