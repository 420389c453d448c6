//! Statically configured nodes: list, create and edit.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use super::shared::{
	CheckField, Load, Pager, ReadonlyField, TextField, load_with, use_client, use_page_size, yes_no,
};
use crate::api::records::{NodeInput, NodeUpdate};
use crate::api::{ListPage, ListParams, NetworkNode, Resource};
use crate::components::notify::use_notifier;
use crate::node_id::{FieldErrors, validate_node_id};

/// Builds the create payload from the form, checking the id.
pub fn node_input(id_text: &str, tag: &str, in_use: bool) -> Result<NodeInput, FieldErrors> {
	let id = validate_node_id("id", id_text.trim())?;
	Ok(NodeInput {
		id,
		tag: tag.trim().to_string(),
		in_use,
	})
}

/// Paged table of static nodes.
#[component]
pub fn NodesList() -> impl IntoView {
	let per_page = use_page_size();
	let page = RwSignal::new(1usize);
	let revision = RwSignal::new(0u32);
	let nodes = load_with(
		move || (page.get(), revision.get()),
		move |client, (page, _)| async move {
			client
				.get_list::<NetworkNode>(Resource::Nodes, &ListParams::sorted_by("id").page(page, per_page))
				.await
		},
	);
	let total = Signal::derive(move || match nodes.get() {
		Load::Ready(ListPage { total, .. }) => total,
		_ => 0,
	});

	let notifier = use_notifier();
	let client = use_client();
	let delete = move |node: NetworkNode| {
		let client = client.clone();
		spawn_local(async move {
			match client.delete(Resource::Nodes, &node.id.0.to_string()).await {
				Ok(()) => {
					notifier.info(format!("Node {} deleted", node.id));
					revision.update(|r| *r += 1);
				}
				Err(err) => notifier.error(err.user_message()),
			}
		});
	};

	view! {
		<section class="resource">
			<div class="toolbar">
				<h2>"Static nodes"</h2>
				<A href="/nodes/create">"Create"</A>
			</div>
			{move || match nodes.get() {
				Load::Pending => view! { <p>"Loading..."</p> }.into_any(),
				Load::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
				Load::Ready(list) => {
					let delete = delete.clone();
					view! {
						<table>
							<thead>
								<tr>
									<th>"Id"</th>
									<th>"Tag"</th>
									<th>"In use"</th>
									<th>"Local"</th>
									<th></th>
								</tr>
							</thead>
							<tbody>
								{list
									.records
									.into_iter()
									.map(|node| {
										let delete = delete.clone();
										let target = node.clone();
										view! {
											<tr>
												<td>{node.id.to_string()}</td>
												<td>{node.tag.clone()}</td>
												<td>{yes_no(node.in_use)}</td>
												<td>{yes_no(node.is_local)}</td>
												<td>
													<A href=format!("/nodes/{}", node.id.0)>"Edit"</A>
													<button class="danger" on:click=move |_| delete(target.clone())>
														"Delete"
													</button>
												</td>
											</tr>
										}
									})
									.collect_view()}
							</tbody>
						</table>
					}
						.into_any()
				}
			}}
			<Pager page=page total=total per_page=per_page />
		</section>
	}
}

/// Form creating a static node.
#[component]
pub fn NodeCreate() -> impl IntoView {
	let id = RwSignal::new(String::new());
	let tag = RwSignal::new(String::new());
	let in_use = RwSignal::new(true);
	let errors = RwSignal::new(FieldErrors::new());
	let notifier = use_notifier();
	let client = use_client();
	let navigate = use_navigate();

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let input = match node_input(&id.get_untracked(), &tag.get_untracked(), in_use.get_untracked()) {
			Ok(input) => input,
			Err(field_errors) => {
				errors.set(field_errors);
				return;
			}
		};
		errors.set(FieldErrors::new());
		let client = client.clone();
		let navigate = navigate.clone();
		spawn_local(async move {
			match client.create::<_, NetworkNode>(Resource::Nodes, &input).await {
				Ok(node) => {
					notifier.info(format!("Node {} created", node.id));
					navigate("/nodes", Default::default());
				}
				Err(err) => notifier.error(err.user_message()),
			}
		});
	};

	view! {
		<section class="resource">
			<h2>"Create static node"</h2>
			<form on:submit=on_submit>
				<TextField label="Id" field="id" value=id errors=errors />
				<TextField label="Tag" value=tag />
				<CheckField label="In use" value=in_use />
				<button type="submit">"Save"</button>
			</form>
		</section>
	}
}

/// Form editing a static node's tag and state.
#[component]
pub fn NodeEdit() -> impl IntoView {
	let params = use_params_map();
	let key = move || params.read().get("id").unwrap_or_default();
	let node = load_with(key, move |client, id| async move {
		client.get_one::<NetworkNode>(Resource::Nodes, &id).await
	});

	view! {
		<section class="resource">
			<h2>"Edit static node"</h2>
			{move || match node.get() {
				Load::Pending => view! { <p>"Loading..."</p> }.into_any(),
				Load::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
				Load::Ready(node) => view! { <NodeEditForm node=node /> }.into_any(),
			}}
		</section>
	}
}

#[component]
fn NodeEditForm(node: NetworkNode) -> impl IntoView {
	let tag = RwSignal::new(node.tag.clone());
	let in_use = RwSignal::new(node.in_use);
	let notifier = use_notifier();
	let client = use_client();
	let navigate = use_navigate();
	let id = node.id;

	let (save_client, save_navigate) = (client.clone(), navigate.clone());
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let update = NodeUpdate {
			tag: tag.get_untracked().trim().to_string(),
			in_use: in_use.get_untracked(),
		};
		let (client, navigate) = (save_client.clone(), save_navigate.clone());
		spawn_local(async move {
			match client
				.update::<_, NetworkNode>(Resource::Nodes, &id.0.to_string(), &update)
				.await
			{
				Ok(_) => {
					notifier.info(format!("Node {} saved", id));
					navigate("/nodes", Default::default());
				}
				Err(err) => notifier.error(err.user_message()),
			}
		});
	};

	let on_delete = move |_| {
		let (client, navigate) = (client.clone(), navigate.clone());
		spawn_local(async move {
			match client.delete(Resource::Nodes, &id.0.to_string()).await {
				Ok(()) => {
					notifier.info(format!("Node {} deleted", id));
					navigate("/nodes", Default::default());
				}
				Err(err) => notifier.error(err.user_message()),
			}
		});
	};

	view! {
		<form on:submit=on_submit>
			<ReadonlyField label="Id" value=id.to_string() />
			<TextField label="Tag" value=tag />
			<CheckField label="In use" value=in_use />
			<div class="toolbar">
				<button type="submit">"Save"</button>
				<button type="button" class="danger" on:click=on_delete>
					"Delete"
				</button>
			</div>
		</form>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node_id::{INVALID_NODE_ID, NodeId};

	#[test]
	fn create_payload_uses_the_numeric_id() {
		let input = node_input("N0003E8", " kitchen ", true).unwrap();
		assert_eq!(input.id, NodeId(0x3E8));
		assert_eq!(input.tag, "kitchen");
		assert_eq!(
			serde_json::to_value(&input).unwrap(),
			serde_json::json!({ "id": 1000, "tag": "kitchen", "in_use": true })
		);
	}

	#[test]
	fn create_rejects_non_canonical_ids() {
		for text in ["", "N3E8", "0x3e8", "1000", "NXXXXXX"] {
			let errors = node_input(text, "", false).unwrap_err();
			assert_eq!(errors.get("id").map(String::as_str), Some(INVALID_NODE_ID));
		}
	}
}
