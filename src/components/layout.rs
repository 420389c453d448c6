//! Page shell: navigation menu beside the routed content.

use leptos::prelude::*;
use leptos_router::components::A;

use super::notify::Notifications;
use crate::api::Resource;

/// Route of the graph view.
pub const GRAPH_ROUTE: &str = "/showgraph";

/// Route of the static-network discovery view.
pub const DISCOVERY_ROUTE: &str = "/discoverylive";

/// Menu entries as `(href, label)`, in display order.
pub fn menu_entries() -> Vec<(String, &'static str)> {
	let mut entries = vec![("/".to_string(), "Dashboard")];
	entries.extend(
		Resource::ALL
			.into_iter()
			.filter(|r| *r != Resource::Neighbors)
			.map(|r| (format!("/{}", r.path()), r.label())),
	);
	entries.push((DISCOVERY_ROUTE.to_string(), "Discovery"));
	entries.push((GRAPH_ROUTE.to_string(), "Show Graph"));
	entries
}

/// Application frame around every page.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
	view! {
		<div class="shell">
			<header class="app-bar">
				<h1>"Mesh Network"</h1>
			</header>
			<nav class="menu">
				<ul>
					{menu_entries()
						.into_iter()
						.map(|(href, label)| view! { <li><A href=href>{label}</A></li> })
						.collect_view()}
				</ul>
			</nav>
			<main class="content">{children()}</main>
			<Notifications />
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn menu_lists_browsable_resources_between_dashboard_and_graph() {
		let entries = menu_entries();
		let hrefs: Vec<&str> = entries.iter().map(|(h, _)| h.as_str()).collect();
		assert_eq!(
			hrefs,
			vec![
				"/",
				"/nodes",
				"/links",
				"/autoNodes",
				"/autoLinks",
				"/esphomeServers",
				"/esphomeConnections",
				"/discoverylive",
				"/showgraph",
			]
		);
		assert_eq!(entries[3].1, "Dynamic nodes");
	}
}
