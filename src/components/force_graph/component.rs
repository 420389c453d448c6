//! Leptos component wrapping the force-directed graph canvas.
//!
//! The canvas, animation loop and listeners are set up once per mount. A
//! separate effect rebuilds the simulation whenever the `data` signal changes,
//! keeping the current pan/zoom.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::ForceGraphState;
use super::theme::Theme;
use super::types::GraphData;

/// Simulation plus drawing settings, present once the canvas is mounted.
struct MountedGraph {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
	render_ok: bool,
}

type SharedGraph = Rc<RefCell<Option<MountedGraph>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// Nodes are drawn in their own color with their label beside them; hovering
/// a node highlights its links and shows each link's weight as a percentage.
/// Link rest lengths follow [`link_distance`](crate::topology::link_distance).
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and follow window resizes.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(optional)] width: Option<f64>,
	#[prop(optional)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedGraph = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));

	let alive_cleanup = alive.clone();
	on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

	let (context_init, animate_init, resize_cb_init, alive_init) =
		(context.clone(), animate.clone(), resize_cb.clone(), alive.clone());
	Effect::new(move |mounted: Option<bool>| {
		if mounted == Some(true) {
			return true;
		}
		let Some(canvas) = canvas_ref.get() else {
			return false;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return false;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window).unwrap_or((800.0, 600.0))
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_width() as f64)
						.filter(|w| *w > 0.0)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_height() as f64)
						.filter(|h| *h > 0.0)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("meshmesh-admin: canvas has no 2d context");
				return true;
			}
		};

		*context_init.borrow_mut() = Some(MountedGraph {
			state: ForceGraphState::new(&data.get_untracked(), w, h),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
			render_ok: true,
		});

		if fullscreen {
			let (context_resize, canvas_resize, alive_resize) =
				(context_init.clone(), canvas.clone(), alive_init.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				if !alive_resize.load(Ordering::Relaxed) {
					return;
				}
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, alive_anim) =
			(context_init.clone(), animate_init.clone(), alive_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				debug!("meshmesh-admin: graph canvas unmounted, stopping animation");
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.state.animation_running {
					c.state.tick(0.016);
				}
				let rendered = render::render(&c.state, &ctx, &c.scale, &c.theme);
				if let Err(ref err) = rendered {
					if c.render_ok {
						warn!("meshmesh-admin: graph render failed: {:?}", err);
					}
				}
				c.render_ok = rendered.is_ok();
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
		true
	});

	let context_data = context.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if let Some(ref mut c) = *context_data.borrow_mut() {
			let transform = c.state.transform.clone();
			c.state = ForceGraphState::new(&graph, c.state.width, c.state.height);
			c.state.transform = transform;
			debug!(
				"meshmesh-admin: canvas rebuilt with {} nodes, {} links",
				graph.nodes.len(),
				graph.links.len()
			);
		}
	});

	let down_graph = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut c) = *down_graph.borrow_mut() {
			c.state.pointer_down(x, y, &c.scale);
		}
	};

	let move_graph = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut c) = *move_graph.borrow_mut() {
			c.state.pointer_move(x, y, &c.scale);
		}
	};

	let up_graph = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *up_graph.borrow_mut() {
			c.state.pointer_up();
		}
	};

	let leave_graph = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *leave_graph.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	let wheel_graph = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut c) = *wheel_graph.borrow_mut() {
			c.state.zoom_at(x, y, ev.delta_y() < 0.0);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
