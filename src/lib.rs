//! meshmesh-admin: browser administration console for a meshmesh network.
//!
//! Lists and edits statically configured nodes and links, shows the
//! auto-discovered network and ESPHome pairings, and draws the topology as a
//! force-directed graph. Everything runs client-side against the backend's
//! REST API.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod node_id;
pub mod pages;
pub mod topology;

pub use api::RestClient;
pub use components::force_graph::{ForceGraphCanvas, GraphData, GraphLink, GraphNode};
pub use config::AppConfig;

use crate::components::layout::Shell;
use crate::components::notify::provide_notifier;
use crate::pages::auto_links::AutoLinksList;
use crate::pages::auto_nodes::{AutoNodeEdit, AutoNodesList};
use crate::pages::dashboard::Dashboard;
use crate::pages::esphome::{EsphomeClientsList, EsphomeServersList};
use crate::pages::links::{LinkCreate, LinkEdit, LinksList};
use crate::pages::nodes::{NodeCreate, NodeEdit, NodesList};
use crate::pages::not_found::NotFound;
use crate::pages::show_graph::{Discovery, ShowGraph};

/// Initialize logging and panic hooks for the WASM target.
///
/// Starts at `Debug` so configuration problems are visible; narrow it
/// afterwards with [`apply_log_level`].
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("meshmesh-admin: logging initialized");
}

/// Restricts console output to `level` and above.
pub fn apply_log_level(level: Level) {
	log::set_max_level(level.to_level_filter());
}

/// Application root: provides the client, config and notifier, then routes.
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
	provide_meta_context();

	info!("meshmesh-admin: using API at {}", config.api_base);
	provide_context(RestClient::new(&config.api_base));
	provide_context(config);
	provide_notifier();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Mesh Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Shell>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Dashboard />
					<Route path=path!("/nodes") view=NodesList />
					<Route path=path!("/nodes/create") view=NodeCreate />
					<Route path=path!("/nodes/:id") view=NodeEdit />
					<Route path=path!("/links") view=LinksList />
					<Route path=path!("/links/create") view=LinkCreate />
					<Route path=path!("/links/:id") view=LinkEdit />
					<Route path=path!("/autoNodes") view=AutoNodesList />
					<Route path=path!("/autoNodes/:id") view=AutoNodeEdit />
					<Route path=path!("/autoLinks") view=AutoLinksList />
					<Route path=path!("/esphomeServers") view=EsphomeServersList />
					<Route path=path!("/esphomeConnections") view=EsphomeClientsList />
					<Route path=path!("/discoverylive") view=Discovery />
					<Route path=path!("/showgraph") view=ShowGraph />
				</Routes>
			</Shell>
		</Router>
	}
}
