//! Statically configured links: list, create and edit.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use super::shared::{Load, Pager, TextField, load_with, use_client, use_page_size};
use crate::api::records::{LinkInput, percent_to_weight, record_key, weight_to_percent};
use crate::api::{ListPage, ListParams, NetworkLink, Resource, RestClient};
use crate::components::notify::{Notifier, use_notifier};
use crate::node_id::{FieldErrors, validate_node_id};

/// Message for a weight outside `0..=100` percent.
pub const INVALID_WEIGHT: &str = "Weight must be between 0 and 100";

/// Builds the link payload from the form. Both endpoints are checked and
/// every failing field is reported at once.
pub fn link_input(from: &str, to: &str, percent: &str) -> Result<LinkInput, FieldErrors> {
	let mut errors = FieldErrors::new();
	let from = validate_node_id("from", from.trim()).map_err(|e| errors.extend(e)).ok();
	let to = validate_node_id("to", to.trim()).map_err(|e| errors.extend(e)).ok();
	let weight = percent
		.trim()
		.parse::<f64>()
		.ok()
		.filter(|p| (0.0..=100.0).contains(p))
		.map(percent_to_weight);
	if weight.is_none() {
		errors.insert("weight".to_string(), INVALID_WEIGHT.to_string());
	}
	match (from, to, weight) {
		(Some(from), Some(to), Some(weight)) => Ok(LinkInput { from, to, weight }),
		_ => Err(errors),
	}
}

/// Weight cell text.
pub fn percent_text(weight: f64) -> String {
	format!("{}%", weight_to_percent(weight))
}

/// Table rows shared by the static and dynamic link lists.
pub fn link_rows(links: Vec<NetworkLink>, actions: impl Fn(&NetworkLink) -> AnyView) -> impl IntoView {
	links
		.into_iter()
		.map(|link| {
			let actions = actions(&link);
			view! {
				<tr>
					<td>{link.from.to_string()}</td>
					<td>{link.to.to_string()}</td>
					<td>{percent_text(link.weight)}</td>
					<td>{actions}</td>
				</tr>
			}
		})
		.collect_view()
}

/// Paged table of static links.
#[component]
pub fn LinksList() -> impl IntoView {
	let per_page = use_page_size();
	let page = RwSignal::new(1usize);
	let revision = RwSignal::new(0u32);
	let links = load_with(
		move || (page.get(), revision.get()),
		move |client, (page, _)| async move {
			client
				.get_list::<NetworkLink>(Resource::Links, &ListParams::sorted_by("id").page(page, per_page))
				.await
		},
	);
	let total = Signal::derive(move || match links.get() {
		Load::Ready(ListPage { total, .. }) => total,
		_ => 0,
	});

	let notifier = use_notifier();
	let client = use_client();
	let delete = move |key: String| {
		let client = client.clone();
		spawn_local(async move {
			match client.delete(Resource::Links, &key).await {
				Ok(()) => {
					notifier.info("Link deleted");
					revision.update(|r| *r += 1);
				}
				Err(err) => notifier.error(err.user_message()),
			}
		});
	};

	view! {
		<section class="resource">
			<div class="toolbar">
				<h2>"Static links"</h2>
				<A href="/links/create">"Create"</A>
			</div>
			{move || match links.get() {
				Load::Pending => view! { <p>"Loading..."</p> }.into_any(),
				Load::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
				Load::Ready(list) => {
					let delete = delete.clone();
					let actions = move |link: &NetworkLink| {
						let key = record_key(&link.id);
						let delete = delete.clone();
						let target = key.clone();
						view! {
							<A href=format!("/links/{}", key)>"Edit"</A>
							<button class="danger" on:click=move |_| delete(target.clone())>
								"Delete"
							</button>
						}
							.into_any()
					};
					view! {
						<table>
							<thead>
								<tr>
									<th>"From"</th>
									<th>"To"</th>
									<th>"Weight"</th>
									<th></th>
								</tr>
							</thead>
							<tbody>{link_rows(list.records, actions)}</tbody>
						</table>
					}
						.into_any()
				}
			}}
			<Pager page=page total=total per_page=per_page />
		</section>
	}
}

/// Endpoint and weight inputs.
#[component]
fn LinkFields(
	from: RwSignal<String>,
	to: RwSignal<String>,
	weight: RwSignal<String>,
	errors: RwSignal<FieldErrors>,
) -> impl IntoView {
	view! {
		<TextField label="From" field="from" value=from errors=errors />
		<TextField label="To" field="to" value=to errors=errors />
		<label class="field">
			<span>"Weight (%)"</span>
			<input
				type="number"
				min="0"
				max="100"
				step="5"
				prop:value=move || weight.get()
				on:input=move |ev| weight.set(event_target_value(&ev))
			/>
			<Show when=move || errors.read().contains_key("weight")>
				<span class="field-error">{INVALID_WEIGHT}</span>
			</Show>
		</label>
	}
}

/// Sends the form, reporting validation failures inline and backend
/// failures as notifications. `key` selects update over create.
#[allow(clippy::too_many_arguments)]
fn submit_link(
	client: RestClient,
	notifier: Notifier,
	key: Option<String>,
	from: RwSignal<String>,
	to: RwSignal<String>,
	weight: RwSignal<String>,
	errors: RwSignal<FieldErrors>,
	navigate: impl Fn(&str, leptos_router::NavigateOptions) + 'static,
) {
	let input = match link_input(&from.get_untracked(), &to.get_untracked(), &weight.get_untracked()) {
		Ok(input) => input,
		Err(field_errors) => {
			errors.set(field_errors);
			return;
		}
	};
	errors.set(FieldErrors::new());
	spawn_local(async move {
		let saved = match key {
			Some(key) => client.update::<_, NetworkLink>(Resource::Links, &key, &input).await,
			None => client.create::<_, NetworkLink>(Resource::Links, &input).await,
		};
		match saved {
			Ok(link) => {
				notifier.info(format!("Link {} -> {} saved", link.from, link.to));
				navigate("/links", Default::default());
			}
			Err(err) => notifier.error(err.user_message()),
		}
	});
}

/// Form creating a static link.
#[component]
pub fn LinkCreate() -> impl IntoView {
	let from = RwSignal::new(String::new());
	let to = RwSignal::new(String::new());
	let weight = RwSignal::new("100".to_string());
	let errors = RwSignal::new(FieldErrors::new());
	let navigate = use_navigate();
	let notifier = use_notifier();
	let client = use_client();

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		submit_link(client.clone(), notifier, None, from, to, weight, errors, navigate.clone());
	};

	view! {
		<section class="resource">
			<h2>"Create static link"</h2>
			<form on:submit=on_submit>
				<LinkFields from=from to=to weight=weight errors=errors />
				<button type="submit">"Save"</button>
			</form>
		</section>
	}
}

/// Form editing a static link.
#[component]
pub fn LinkEdit() -> impl IntoView {
	let params = use_params_map();
	let key = move || params.read().get("id").unwrap_or_default();
	let link = load_with(key, move |client, id| async move {
		client.get_one::<NetworkLink>(Resource::Links, &id).await
	});

	view! {
		<section class="resource">
			<h2>"Edit static link"</h2>
			{move || match link.get() {
				Load::Pending => view! { <p>"Loading..."</p> }.into_any(),
				Load::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
				Load::Ready(link) => view! { <LinkEditForm link=link /> }.into_any(),
			}}
		</section>
	}
}

#[component]
fn LinkEditForm(link: NetworkLink) -> impl IntoView {
	let from = RwSignal::new(link.from.to_string());
	let to = RwSignal::new(link.to.to_string());
	let weight = RwSignal::new(weight_to_percent(link.weight).to_string());
	let errors = RwSignal::new(FieldErrors::new());
	let key = record_key(&link.id);
	let navigate = use_navigate();
	let notifier = use_notifier();
	let client = use_client();

	let (save_client, save_key, save_navigate) = (client.clone(), key.clone(), navigate.clone());
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		submit_link(
			save_client.clone(),
			notifier,
			Some(save_key.clone()),
			from,
			to,
			weight,
			errors,
			save_navigate.clone(),
		);
	};

	let on_delete = move |_| {
		let (client, navigate, key) = (client.clone(), navigate.clone(), key.clone());
		spawn_local(async move {
			match client.delete(Resource::Links, &key).await {
				Ok(()) => {
					notifier.info("Link deleted");
					navigate("/links", Default::default());
				}
				Err(err) => notifier.error(err.user_message()),
			}
		});
	};

	view! {
		<form on:submit=on_submit>
			<LinkFields from=from to=to weight=weight errors=errors />
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
	fn weight_is_entered_in_percent_and_stored_as_fraction() {
		let input = link_input("N000001", "N000002", "35").unwrap();
		assert_eq!(input.from, NodeId(1));
		assert_eq!(input.to, NodeId(2));
		assert_eq!(input.weight, 0.35);
		assert_eq!(percent_text(0.35), "35%");
	}

	#[test]
	fn every_invalid_field_is_reported() {
		let errors = link_input("N1", "N00000G", "120").unwrap_err();
		assert_eq!(errors.len(), 3);
		assert_eq!(errors["from"], INVALID_NODE_ID);
		assert_eq!(errors["to"], INVALID_NODE_ID);
		assert_eq!(errors["weight"], INVALID_WEIGHT);
	}

	#[test]
	fn weight_bounds_are_inclusive() {
		assert_eq!(link_input("N000001", "N000002", "0").unwrap().weight, 0.0);
		assert_eq!(link_input("N000001", "N000002", "100").unwrap().weight, 1.0);
		assert!(link_input("N000001", "N000002", "").is_err());
		assert!(link_input("N000001", "N000002", "-5").is_err());
	}
}
