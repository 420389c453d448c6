//! Transient notifications.
//!
//! Pages report command outcomes through a [`Notifier`] taken from context.
//! Each notification dismisses itself after [`DISPLAY_TIME`].

use std::time::Duration;

use leptos::prelude::*;
use log::{info, warn};

/// How long a notification stays on screen.
pub const DISPLAY_TIME: Duration = Duration::from_secs(5);

/// Severity, which picks the styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyLevel {
	Info,
	Error,
}

impl NotifyLevel {
	fn class(self) -> &'static str {
		match self {
			NotifyLevel::Info => "notification info",
			NotifyLevel::Error => "notification error",
		}
	}
}

/// One message on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
	pub id: u64,
	pub level: NotifyLevel,
	pub text: String,
}

/// Messages currently shown, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationQueue {
	items: Vec<Notification>,
	next_id: u64,
}

impl NotificationQueue {
	/// Appends a message and returns its id.
	pub fn push(&mut self, level: NotifyLevel, text: impl Into<String>) -> u64 {
		self.next_id += 1;
		self.items.push(Notification {
			id: self.next_id,
			level,
			text: text.into(),
		});
		self.next_id
	}

	/// Removes a message. Unknown ids are ignored.
	pub fn dismiss(&mut self, id: u64) {
		self.items.retain(|n| n.id != id);
	}

	pub fn items(&self) -> &[Notification] {
		&self.items
	}
}

/// Handle for raising notifications. Copyable, shared through context.
#[derive(Clone, Copy, Debug)]
pub struct Notifier {
	queue: RwSignal<NotificationQueue>,
}

impl Notifier {
	/// Shows an informational message.
	pub fn info(&self, text: impl Into<String>) {
		let text = text.into();
		info!("meshmesh-admin: {}", text);
		self.show(NotifyLevel::Info, text);
	}

	/// Shows a failure message.
	pub fn error(&self, text: impl Into<String>) {
		let text = text.into();
		warn!("meshmesh-admin: {}", text);
		self.show(NotifyLevel::Error, text);
	}

	fn show(&self, level: NotifyLevel, text: String) {
		let mut id = 0;
		self.queue.update(|q| id = q.push(level, text));
		let queue = self.queue;
		set_timeout(move || queue.update(|q| q.dismiss(id)), DISPLAY_TIME);
	}

	fn dismiss(&self, id: u64) {
		self.queue.update(|q| q.dismiss(id));
	}
}

/// Creates the notifier and places it in context.
pub fn provide_notifier() -> Notifier {
	let notifier = Notifier {
		queue: RwSignal::new(NotificationQueue::default()),
	};
	provide_context(notifier);
	notifier
}

/// The notifier provided by [`provide_notifier`].
pub fn use_notifier() -> Notifier {
	expect_context::<Notifier>()
}

/// Renders the current notifications. Clicking one dismisses it early.
#[component]
pub fn Notifications() -> impl IntoView {
	let notifier = use_notifier();
	view! {
		<div class="notifications">
			<For
				each=move || notifier.queue.get().items().to_vec()
				key=|n| n.id
				children=move |n| {
					let id = n.id;
					view! {
						<div class=n.level.class() on:click=move |_| notifier.dismiss(id)>
							{n.text}
						</div>
					}
				}
			/>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_increase_and_dismiss_removes_only_that_message() {
		let mut queue = NotificationQueue::default();
		let a = queue.push(NotifyLevel::Info, "Node rebooted");
		let b = queue.push(NotifyLevel::Error, "Node not found");
		assert!(b > a);

		queue.dismiss(a);
		assert_eq!(queue.items().len(), 1);
		assert_eq!(queue.items()[0].text, "Node not found");
		assert_eq!(queue.items()[0].level, NotifyLevel::Error);

		queue.dismiss(a);
		queue.dismiss(99);
		assert_eq!(queue.items().len(), 1);
	}

	#[test]
	fn ids_are_not_reused_after_dismissal() {
		let mut queue = NotificationQueue::default();
		let a = queue.push(NotifyLevel::Info, "one");
		queue.dismiss(a);
		let b = queue.push(NotifyLevel::Info, "two");
		assert_ne!(a, b);
	}
}
