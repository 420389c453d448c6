//! Landing page: backend revision and network counters.

use leptos::prelude::*;
use serde_json::Value;

use super::shared::{Load, load_with};
use crate::api::records::Hello;
use crate::api::{ListParams, Resource};

/// Counter card fed by a one-record list query, reading the total from the
/// `Content-Range` header.
#[component]
fn StatCard(title: &'static str, resource: Resource) -> impl IntoView {
	let count = load_with(
		|| (),
		move |client, ()| async move {
			client
				.get_list::<Value>(resource, &ListParams::sorted_by("id").page(1, 1))
				.await
				.map(|page| page.total)
		},
	);
	view! {
		<div class="stat-card">
			<h3>{title}</h3>
			<p class="stat-value">
				{move || match count.get() {
					Load::Pending => "...".to_string(),
					Load::Ready(total) => total.to_string(),
					Load::Failed(_) => "-".to_string(),
				}}
			</p>
		</div>
	}
}

#[component]
fn RevisionCard() -> impl IntoView {
	let hello = load_with(|| (), |client, ()| async move { client.hello().await });
	view! {
		<div class="stat-card">
			{move || match hello.get() {
				Load::Pending => view! { <p>"Loading..."</p> }.into_any(),
				Load::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
				Load::Ready(Hello { program_name, program_description, program_revision }) => {
					view! {
						<h3>{program_name}</h3>
						<p>{program_description}</p>
						<p class="revision">"Revision " {program_revision}</p>
					}
						.into_any()
				}
			}}
		</div>
	}
}

/// Overview shown at the root route.
#[component]
pub fn Dashboard() -> impl IntoView {
	view! {
		<section class="dashboard">
			<h2>"Welcome to the MeshMeshGo Admin"</h2>
			<div class="cards">
				<RevisionCard />
				<StatCard title="Dynamic nodes" resource=Resource::AutoNodes />
				<StatCard title="Static links" resource=Resource::Links />
			</div>
		</section>
	}
}
