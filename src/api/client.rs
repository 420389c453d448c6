//! REST client for the mesh backend, built on the browser `fetch` API.

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use super::error::ApiError;
use super::query::{ListPage, ListParams, parse_content_range};
use super::records::{CommandReply, Hello};
use super::resource::Resource;
use crate::node_id::NodeId;

/// Raw outcome of a request that reached the backend.
struct Reply {
	status: u16,
	ok: bool,
	content_range: Option<String>,
	body: String,
}

/// Handle on the backend API. Cheap to clone; shared through Leptos context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestClient {
	base_url: String,
}

impl RestClient {
	/// Client for the API rooted at `base_url` (e.g. `/api/v1`).
	pub fn new(base_url: &str) -> Self {
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	/// API root this client talks to.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn url(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}

	/// Lists records of `resource`.
	pub async fn get_list<T: DeserializeOwned>(
		&self,
		resource: Resource,
		params: &ListParams,
	) -> Result<ListPage<T>, ApiError> {
		let url = format!("{}?{}", self.url(resource.path()), params.to_query());
		let reply = expect_success(self.send("GET", &url, None).await?)?;
		let records: Vec<T> = serde_json::from_str(&reply.body)?;
		let total = reply
			.content_range
			.as_deref()
			.and_then(parse_content_range)
			.unwrap_or(records.len());
		debug!(
			"meshmesh-admin: {} returned {} of {} records",
			resource,
			records.len(),
			total
		);
		Ok(ListPage { records, total })
	}

	/// Fetches one record of `resource` by id.
	pub async fn get_one<T: DeserializeOwned>(
		&self,
		resource: Resource,
		id: &str,
	) -> Result<T, ApiError> {
		let url = self.url(&format!("{}/{}", resource.path(), id));
		let reply = expect_success(self.send("GET", &url, None).await?)?;
		Ok(serde_json::from_str(&reply.body)?)
	}

	/// Creates a record and returns the backend's copy of it.
	pub async fn create<B: Serialize, T: DeserializeOwned>(
		&self,
		resource: Resource,
		body: &B,
	) -> Result<T, ApiError> {
		let url = self.url(resource.path());
		let body = serde_json::to_string(body)?;
		let reply = expect_success(self.send("POST", &url, Some(body)).await?)?;
		Ok(serde_json::from_str(&reply.body)?)
	}

	/// Replaces the editable fields of a record.
	pub async fn update<B: Serialize, T: DeserializeOwned>(
		&self,
		resource: Resource,
		id: &str,
		body: &B,
	) -> Result<T, ApiError> {
		let url = self.url(&format!("{}/{}", resource.path(), id));
		let body = serde_json::to_string(body)?;
		let reply = expect_success(self.send("PUT", &url, Some(body)).await?)?;
		Ok(serde_json::from_str(&reply.body)?)
	}

	/// Deletes a record.
	pub async fn delete(&self, resource: Resource, id: &str) -> Result<(), ApiError> {
		let url = self.url(&format!("{}/{}", resource.path(), id));
		expect_success(self.send("DELETE", &url, None).await?)?;
		Ok(())
	}

	/// Program name and revision of the backend.
	pub async fn hello(&self) -> Result<Hello, ApiError> {
		let reply = expect_success(self.send("GET", &self.url("hello"), None).await?)?;
		Ok(serde_json::from_str(&reply.body)?)
	}

	/// Asks the backend to reboot a node. Returns the backend's message.
	pub async fn reboot_node(&self, id: NodeId) -> Result<String, ApiError> {
		let url = self.url(&format!("{}/{}/reboot", Resource::AutoNodes.path(), id.0));
		let reply = expect_success(self.send("POST", &url, None).await?)?;
		let reply: CommandReply = serde_json::from_str(&reply.body).unwrap_or_default();
		Ok(reply.message)
	}

	async fn send(&self, method: &str, url: &str, body: Option<String>) -> Result<Reply, ApiError> {
		let opts = RequestInit::new();
		opts.set_method(method);
		opts.set_mode(RequestMode::SameOrigin);
		if let Some(body) = body {
			let headers = Headers::new().map_err(js_error)?;
			headers
				.set("Content-Type", "application/json")
				.map_err(js_error)?;
			opts.set_headers(&headers);
			opts.set_body(&JsValue::from_str(&body));
		}

		let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
		let window = web_sys::window().ok_or(ApiError::NoWindow)?;
		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(js_error)?
			.dyn_into()
			.map_err(js_error)?;

		let content_range = response.headers().get("Content-Range").ok().flatten();
		let text = JsFuture::from(response.text().map_err(js_error)?)
			.await
			.map_err(js_error)?;

		Ok(Reply {
			status: response.status(),
			ok: response.ok(),
			content_range,
			body: text.as_string().unwrap_or_default(),
		})
	}
}

fn expect_success(reply: Reply) -> Result<Reply, ApiError> {
	if reply.ok {
		return Ok(reply);
	}
	let message = serde_json::from_str::<CommandReply>(&reply.body)
		.map(|r| r.message)
		.unwrap_or_else(|_| reply.body.trim().to_string());
	warn!("meshmesh-admin: request failed with HTTP {}: {}", reply.status, message);
	Err(ApiError::Status {
		status: reply.status,
		message,
	})
}

fn js_error(err: JsValue) -> ApiError {
	ApiError::Network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}
