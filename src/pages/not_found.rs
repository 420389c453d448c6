use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<section class="not-found">
			<h2>"Page not found"</h2>
			<A href="/">"Back to the dashboard"</A>
		</section>
	}
}
