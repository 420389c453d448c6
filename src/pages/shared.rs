//! Building blocks shared by the resource pages: data loading, paging and
//! form fields.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, RestClient};
use crate::config::AppConfig;
use crate::node_id::FieldErrors;

/// Fetch status of a page's data.
#[derive(Clone, Debug, PartialEq)]
pub enum Load<T> {
	Pending,
	Ready(T),
	Failed(String),
}

impl<T> From<Result<T, ApiError>> for Load<T> {
	fn from(result: Result<T, ApiError>) -> Self {
		match result {
			Ok(value) => Load::Ready(value),
			Err(err) => Load::Failed(err.user_message()),
		}
	}
}

/// The client provided by the app root.
pub fn use_client() -> RestClient {
	expect_context::<RestClient>()
}

/// Rows per page from the app config.
pub fn use_page_size() -> usize {
	expect_context::<AppConfig>().list_page_size
}

/// Runs `fetch` with the value of `key`, and again whenever the signals
/// `key` reads change. Only the newest request may write the result.
pub fn load_with<K, T, Fut>(
	key: impl Fn() -> K + 'static,
	fetch: impl Fn(RestClient, K) -> Fut + 'static,
) -> RwSignal<Load<T>>
where
	K: 'static,
	T: Send + Sync + 'static,
	Fut: Future<Output = Result<T, ApiError>> + 'static,
{
	let client = use_client();
	let state = RwSignal::new(Load::Pending);
	let latest = Rc::new(Cell::new(0u64));
	Effect::new(move |_| {
		let generation = latest.get() + 1;
		latest.set(generation);
		let request = fetch(client.clone(), key());
		let latest = latest.clone();
		spawn_local(async move {
			let result = request.await;
			if latest.get() == generation {
				state.set(Load::from(result));
			}
		});
	});
	state
}

/// Number of pages needed for `total` records, never less than one.
pub fn page_count(total: usize, per_page: usize) -> usize {
	total.div_ceil(per_page.max(1)).max(1)
}

/// Previous/next controls for a paged table.
#[component]
pub fn Pager(page: RwSignal<usize>, #[prop(into)] total: Signal<usize>, per_page: usize) -> impl IntoView {
	let pages = move || page_count(total.get(), per_page);
	view! {
		<div class="pager">
			<button disabled=move || page.get() <= 1 on:click=move |_| page.update(|p| *p -= 1)>
				"Previous"
			</button>
			<span>{move || format!("Page {} of {} ({} records)", page.get(), pages(), total.get())}</span>
			<button disabled=move || page.get() >= pages() on:click=move |_| page.update(|p| *p += 1)>
				"Next"
			</button>
		</div>
	}
}

/// Labelled text input. `errors` holds validation failures keyed by field.
#[component]
pub fn TextField(
	label: &'static str,
	value: RwSignal<String>,
	#[prop(optional)] field: &'static str,
	#[prop(optional, into)] errors: Option<Signal<FieldErrors>>,
	#[prop(optional)] readonly: bool,
) -> impl IntoView {
	let error = move || errors.and_then(|e| e.get().get(field).cloned());
	view! {
		<label class="field">
			<span>{label}</span>
			<input
				type="text"
				readonly=readonly
				prop:value=move || value.get()
				on:input=move |ev| value.set(event_target_value(&ev))
			/>
			<Show when=move || error().is_some()>
				<span class="field-error">{error}</span>
			</Show>
		</label>
	}
}

/// Labelled value that cannot be edited.
#[component]
pub fn ReadonlyField(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
	view! {
		<label class="field">
			<span>{label}</span>
			<input type="text" readonly=true prop:value=move || value.get() />
		</label>
	}
}

/// Labelled checkbox.
#[component]
pub fn CheckField(label: &'static str, value: RwSignal<bool>) -> impl IntoView {
	view! {
		<label class="field check">
			<input
				type="checkbox"
				prop:checked=move || value.get()
				on:change=move |ev| value.set(event_target_checked(&ev))
			/>
			<span>{label}</span>
		</label>
	}
}

/// Text for a boolean table cell.
pub fn yes_no(value: bool) -> &'static str {
	if value { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn page_count_rounds_up_and_has_one_page_minimum() {
		assert_eq!(page_count(0, 25), 1);
		assert_eq!(page_count(25, 25), 1);
		assert_eq!(page_count(26, 25), 2);
		assert_eq!(page_count(10, 0), 10);
	}

	#[test]
	fn failed_loads_carry_the_backend_message() {
		let load: Load<()> = Load::from(Err(ApiError::Status {
			status: 404,
			message: "Node not found".to_string(),
		}));
		assert_eq!(load, Load::Failed("Node not found".to_string()));
		assert_eq!(Load::from(Ok::<_, ApiError>(3)), Load::Ready(3));
	}
}
