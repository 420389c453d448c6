//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use meshmesh_admin::{App, AppConfig, apply_log_level, init_logging};

fn main() {
	init_logging();
	let config = AppConfig::load();
	apply_log_level(config.log_level);

	mount_to_body(move || {
		view! { <App config=config /> }
	})
}
