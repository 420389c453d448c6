//! Auto-discovered links, read only.

use leptos::prelude::*;

use super::links::link_rows;
use super::shared::{Load, Pager, load_with, use_page_size};
use crate::api::{ListPage, ListParams, NetworkLink, Resource};

/// Paged table of discovered links.
#[component]
pub fn AutoLinksList() -> impl IntoView {
	let per_page = use_page_size();
	let page = RwSignal::new(1usize);
	let links = load_with(
		move || page.get(),
		move |client, page| async move {
			client
				.get_list::<NetworkLink>(Resource::AutoLinks, &ListParams::sorted_by("id").page(page, per_page))
				.await
		},
	);
	let total = Signal::derive(move || match links.get() {
		Load::Ready(ListPage { total, .. }) => total,
		_ => 0,
	});

	view! {
		<section class="resource">
			<h2>"Dynamic links"</h2>
			{move || match links.get() {
				Load::Pending => view! { <p>"Loading..."</p> }.into_any(),
				Load::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
				Load::Ready(list) => view! {
					<table>
						<thead>
							<tr>
								<th>"From"</th>
								<th>"To"</th>
								<th>"Weight"</th>
								<th></th>
							</tr>
						</thead>
						<tbody>{link_rows(list.records, |_| ().into_any())}</tbody>
					</table>
				}
					.into_any(),
			}}
			<Pager page=page total=total per_page=per_page />
		</section>
	}
}
