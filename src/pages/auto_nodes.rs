//! Auto-discovered nodes: list, edit and reboot.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use super::shared::{
	CheckField, Load, Pager, ReadonlyField, TextField, load_with, use_client, use_page_size, yes_no,
};
use crate::api::records::NodeUpdate;
use crate::api::{ListPage, ListParams, NetworkNode, NodeDetails, Resource, Sort};
use crate::components::notify::use_notifier;

/// Confirmation shown when the backend acknowledges a reboot without text.
const REBOOT_SENT: &str = "Node rebooted";

/// Column header that re-sorts the list on click.
#[component]
fn SortHeader(label: &'static str, field: &'static str, sort: RwSignal<Sort>) -> impl IntoView {
	view! {
		<th class="sortable" on:click=move |_| sort.update(|s| *s = s.toggled(field))>
			{label}
			{move || sort.with(|s| s.marker(field))}
		</th>
	}
}

/// Paged table of discovered nodes, sorted by id unless a header is clicked.
#[component]
pub fn AutoNodesList() -> impl IntoView {
	let per_page = use_page_size();
	let page = RwSignal::new(1usize);
	let sort = RwSignal::new(Sort::default());
	let nodes = load_with(
		move || (page.get(), sort.get()),
		move |client, (page, sort)| async move {
			let params = ListParams::default().with_sort(sort).page(page, per_page);
			client.get_list::<NetworkNode>(Resource::AutoNodes, &params).await
		},
	);
	Effect::new(move |previous: Option<Sort>| {
		let current = sort.get();
		if previous.is_some_and(|p| p != current) {
			page.set(1);
		}
		current
	});
	let total = Signal::derive(move || match nodes.get() {
		Load::Ready(ListPage { total, .. }) => total,
		_ => 0,
	});

	view! {
		<section class="resource">
			<h2>"Dynamic nodes"</h2>
			{move || match nodes.get() {
				Load::Pending => view! { <p>"Loading..."</p> }.into_any(),
				Load::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
				Load::Ready(list) => view! {
					<table>
						<thead>
							<tr>
								<SortHeader label="Id" field="id" sort=sort />
								<SortHeader label="Hostname" field="tag" sort=sort />
								<th>"Firmware"</th>
								<th>"Mesh ver."</th>
								<th>"Compile time"</th>
								<SortHeader label="Last seen" field="last_seen" sort=sort />
								<th>"Type"</th>
								<th>"In use"</th>
								<th>"Path"</th>
								<th></th>
							</tr>
						</thead>
						<tbody>
							{list
								.records
								.into_iter()
								.map(|node| view! {
									<tr>
										<td>{node.id.to_string()}</td>
										<td>{node.tag}</td>
										<td>{node.firmrev}</td>
										<td>{node.libvers}</td>
										<td>{node.comptime}</td>
										<td>{node.last_seen}</td>
										<td>{node.dev_type.abbreviation()}</td>
										<td>{yes_no(node.in_use)}</td>
										<td>{node.path}</td>
										<td><A href=format!("/autoNodes/{}", node.id.0)>"Edit"</A></td>
									</tr>
								})
								.collect_view()}
						</tbody>
					</table>
				}
					.into_any(),
			}}
			<Pager page=page total=total per_page=per_page />
		</section>
	}
}

/// Detail view of one discovered node.
#[component]
pub fn AutoNodeEdit() -> impl IntoView {
	let params = use_params_map();
	let key = move || params.read().get("id").unwrap_or_default();
	let node = load_with(key, move |client, id| async move {
		client.get_one::<NodeDetails>(Resource::AutoNodes, &id).await
	});

	view! {
		<section class="resource">
			<h2>"Dynamic node"</h2>
			{move || match node.get() {
				Load::Pending => view! { <p>"Loading..."</p> }.into_any(),
				Load::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
				Load::Ready(details) => view! { <AutoNodeForm details=details /> }.into_any(),
			}}
		</section>
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Local,
	Remote,
}

#[component]
fn AutoNodeForm(details: NodeDetails) -> impl IntoView {
	let tab = RwSignal::new(Tab::Local);
	let tag = RwSignal::new(details.node.tag.clone());
	let in_use = RwSignal::new(details.node.in_use);
	let notifier = use_notifier();
	let client = use_client();
	let navigate = use_navigate();
	let id = details.node.id;
	let key = id.0.to_string();

	let (save_client, save_navigate, save_key) = (client.clone(), navigate.clone(), key.clone());
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let update = NodeUpdate {
			tag: tag.get_untracked().trim().to_string(),
			in_use: in_use.get_untracked(),
		};
		let (client, navigate, key) = (save_client.clone(), save_navigate.clone(), save_key.clone());
		spawn_local(async move {
			match client
				.update::<_, NodeDetails>(Resource::AutoNodes, &key, &update)
				.await
			{
				Ok(_) => {
					notifier.info(format!("Node {} saved", id));
					navigate("/autoNodes", Default::default());
				}
				Err(err) => notifier.error(err.user_message()),
			}
		});
	};

	let reboot_client = client.clone();
	let on_reboot = move |_| {
		let client = reboot_client.clone();
		spawn_local(async move {
			match client.reboot_node(id).await {
				Ok(message) if message.is_empty() => notifier.info(REBOOT_SENT),
				Ok(message) => notifier.info(message),
				Err(err) => notifier.error(err.user_message()),
			}
		});
	};

	let on_delete = move |_| {
		let (client, navigate, key) = (client.clone(), navigate.clone(), key.clone());
		spawn_local(async move {
			match client.delete(Resource::AutoNodes, &key).await {
				Ok(()) => {
					notifier.info(format!("Node {} deleted", id));
					navigate("/autoNodes", Default::default());
				}
				Err(err) => notifier.error(err.user_message()),
			}
		});
	};

	let node = details.node.clone();
	let remote_ok = details.error.is_empty();
	let dev_tag = details.dev_tag.clone();
	let (channel, tx_power, groups) = (details.channel, details.tx_power, details.groups);
	view! {
		<div class="tabs">
			<button class:active=move || tab.get() == Tab::Local on:click=move |_| tab.set(Tab::Local)>
				"Local graph information"
			</button>
			<button class:active=move || tab.get() == Tab::Remote on:click=move |_| tab.set(Tab::Remote)>
				"Remote information"
			</button>
		</div>
		<form on:submit=on_submit>
			<div class="tab" class:hidden=move || tab.get() != Tab::Local>
				<ReadonlyField label="Id" value=id.to_string() />
				<TextField label="Host name" value=tag />
				<ReadonlyField label="Firmware" value=node.firmrev />
				<ReadonlyField label="EspMeshMesh version" value=node.libvers />
				<ReadonlyField label="Compile time" value=node.comptime />
				<ReadonlyField label="Last seen" value=node.last_seen />
				<CheckField label="In use" value=in_use />
			</div>
			<div class="tab" class:hidden=move || tab.get() != Tab::Remote>
				<ReadonlyField label="Error" value=details.error_display().to_string() />
				<Show when=move || remote_ok>
					<ReadonlyField label="Device tag" value=dev_tag.clone() />
					<ReadonlyField label="WIFI channel" value=channel.to_string() />
					<ReadonlyField label="TX power" value=tx_power.to_string() />
					<ReadonlyField label="Groups" value=groups.to_string() />
				</Show>
				<ReadonlyField label="Revision" value=details.revision.clone() />
				<ReadonlyField label="Binded" value=details.binded_display() />
				<ReadonlyField label="Flags" value=details.flags.to_string() />
			</div>
			<div class="toolbar">
				<button type="submit">"Save changes"</button>
				<button type="button" on:click=on_reboot>
					"Reboot"
				</button>
				<button type="button" class="danger" on:click=on_delete>
					"Delete"
				</button>
			</div>
		</form>
	}
}
