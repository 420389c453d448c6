//! ESPHome API servers and client connections, read only.
//!
//! The console does not interpret these records, so the table columns are
//! whatever fields the backend sends.

use leptos::prelude::*;

use super::shared::{Load, Pager, load_with, use_page_size};
use crate::api::records::record_key;
use crate::api::{EsphomeRecord, ListPage, ListParams, Resource};

#[component]
fn EsphomeTable(resource: Resource) -> impl IntoView {
	let per_page = use_page_size();
	let page = RwSignal::new(1usize);
	let records = load_with(
		move || page.get(),
		move |client, page| async move {
			client
				.get_list::<EsphomeRecord>(resource, &ListParams::sorted_by("id").page(page, per_page))
				.await
		},
	);
	let total = Signal::derive(move || match records.get() {
		Load::Ready(ListPage { total, .. }) => total,
		_ => 0,
	});

	view! {
		<section class="resource">
			<h2>{resource.label()}</h2>
			{move || match records.get() {
				Load::Pending => view! { <p>"Loading..."</p> }.into_any(),
				Load::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
				Load::Ready(list) => {
					let columns = EsphomeRecord::columns(&list.records);
					view! {
						<table>
							<thead>
								<tr>
									<th>"Id"</th>
									{columns.iter().map(|c| view! { <th>{c.clone()}</th> }).collect_view()}
								</tr>
							</thead>
							<tbody>
								{list
									.records
									.iter()
									.map(|record| view! {
										<tr>
											<td>{record_key(&record.id)}</td>
											{columns
												.iter()
												.map(|c| view! { <td>{record.cell(c)}</td> })
												.collect_view()}
										</tr>
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

/// ESPHome API servers exposed by the backend.
#[component]
pub fn EsphomeServersList() -> impl IntoView {
	view! { <EsphomeTable resource=Resource::EsphomeServers /> }
}

/// Clients connected to the ESPHome API servers.
#[component]
pub fn EsphomeClientsList() -> impl IntoView {
	view! { <EsphomeTable resource=Resource::EsphomeConnections /> }
}
