//! Topology view: network selector above the force-directed canvas.
//!
//! [`NetworkGraph`] owns a [`GraphAssembler`] and performs the fetches it
//! asks for, one at a time, feeding each completion back in. Only views the
//! assembler publishes reach the canvas.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use super::shared::use_client;
use crate::api::{ListParams, NetworkLink, NetworkNode, RestClient};
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::topology::{FetchKind, FetchRequest, GraphAssembler, NetworkVariant};

/// Canvas height of the graph view, in pixels.
const GRAPH_HEIGHT: f64 = 650.0;

type SharedAssembler = Rc<RefCell<GraphAssembler>>;

/// Where the graph view publishes its results.
#[derive(Clone, Copy)]
struct GraphOutput {
	graph: RwSignal<GraphData>,
	error: RwSignal<Option<String>>,
}

/// Runs one assembler request and chains the follow-up it returns.
fn run_fetch(client: RestClient, assembler: SharedAssembler, request: FetchRequest, output: GraphOutput) {
	spawn_local(async move {
		let params = ListParams::sorted_by("id");
		match request.kind {
			FetchKind::Nodes => {
				let result = client
					.get_list::<NetworkNode>(request.resource, &params)
					.await
					.map(|page| page.records);
				let failed = result.as_ref().err().map(|e| e.user_message());
				let next = assembler.borrow_mut().nodes_loaded(request.ticket, result);
				match next {
					Some(next) => run_fetch(client, assembler, next, output),
					None => report_failure(&assembler, request, failed, output),
				}
			}
			FetchKind::Links => {
				let result = client
					.get_list::<NetworkLink>(request.resource, &params)
					.await
					.map(|page| page.records);
				let failed = result.as_ref().err().map(|e| e.user_message());
				let published = assembler
					.borrow_mut()
					.links_loaded(request.ticket, result)
					.cloned();
				match published {
					Some(view) => output.graph.set(view),
					None => report_failure(&assembler, request, failed, output),
				}
			}
		}
	});
}

/// Shows a fetch failure unless the request belonged to an earlier
/// activation.
fn report_failure(
	assembler: &SharedAssembler,
	request: FetchRequest,
	failed: Option<String>,
	output: GraphOutput,
) {
	let current = assembler.borrow().variant() == Some(request.ticket.variant());
	match failed {
		Some(message) if current && assembler.borrow().last_error().is_some() => {
			output.error.set(Some(message))
		}
		_ => debug!(
			"meshmesh-admin: dropped {:?} response for {:?}",
			request.kind,
			request.ticket.variant()
		),
	}
}

/// Force-directed view of one network variant. Switching `variant` discards
/// the current graph and starts a new fetch cycle.
#[component]
pub fn NetworkGraph(
	#[prop(into)] variant: Signal<NetworkVariant>,
	/// Bumped to refetch the current variant.
	#[prop(into)]
	reload: Signal<u32>,
) -> impl IntoView {
	let client = use_client();
	let assembler: SharedAssembler = Rc::new(RefCell::new(GraphAssembler::new()));
	let output = GraphOutput {
		graph: RwSignal::new(GraphData::default()),
		error: RwSignal::new(None),
	};

	Effect::new(move |previous: Option<NetworkVariant>| {
		let selected = variant.get();
		let reloads = reload.get();
		let request = if previous == Some(selected) {
			debug!("meshmesh-admin: graph reload {}", reloads);
			assembler.borrow_mut().refresh()
		} else {
			Some(assembler.borrow_mut().activate(selected))
		};
		if let Some(request) = request {
			output.graph.set(GraphData::default());
			output.error.set(None);
			run_fetch(client.clone(), assembler.clone(), request, output);
		}
		selected
	});

	view! {
		<div class="network-graph">
			<Show when=move || output.error.get().is_some()>
				<p class="error">{move || output.error.get()}</p>
			</Show>
			<ForceGraphCanvas data=output.graph height=GRAPH_HEIGHT />
		</div>
	}
}

/// Refresh button bumping `reload`.
#[component]
fn RefreshButton(reload: RwSignal<u32>) -> impl IntoView {
	view! { <button on:click=move |_| reload.update(|r| *r += 1)>"Refresh"</button> }
}

/// Title and network-type selector.
#[component]
fn GraphTopBar(selected: RwSignal<NetworkVariant>, reload: RwSignal<u32>) -> impl IntoView {
	view! {
		<div class="graph-top-bar">
			<h2>"Graph visualization"</h2>
			<label class="field">
				<span>"Network type"</span>
				<select
					prop:value=move || selected.get().key()
					on:change=move |ev| {
						if let Some(variant) = NetworkVariant::from_key(&event_target_value(&ev)) {
							selected.set(variant);
						}
					}
				>
					{NetworkVariant::ALL
						.into_iter()
						.map(|v| view! { <option value=v.key()>{v.label()}</option> })
						.collect_view()}
				</select>
			</label>
			<RefreshButton reload=reload />
		</div>
	}
}

/// The graph page.
#[component]
pub fn ShowGraph() -> impl IntoView {
	let selected = RwSignal::new(NetworkVariant::default());
	let reload = RwSignal::new(0u32);
	view! {
		<section class="show-graph">
			<GraphTopBar selected=selected reload=reload />
			<NetworkGraph variant=selected reload=reload />
		</section>
	}
}

/// The configured network on its own, without the variant selector.
#[component]
pub fn Discovery() -> impl IntoView {
	let reload = RwSignal::new(0u32);
	view! {
		<section class="show-graph">
			<div class="graph-top-bar">
				<h2>"Discovery"</h2>
				<RefreshButton reload=reload />
			</div>
			<NetworkGraph variant=Signal::stored(NetworkVariant::Static) reload=reload />
		</section>
	}
}
