use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::BoardState;
use crate::client::GameClient;

const FRAME_DT: f64 = 0.016;

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Sizes the canvas to its container and refits the board to it.
fn fit_to_parent(canvas: &HtmlCanvasElement, board: &RefCell<BoardState>) {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	board.borrow_mut().resize(w, h);
}

/// Canvas view of the puzzle board: click a region to select it, drag the
/// background to pan, scroll to zoom.
#[component]
pub fn BoardCanvas(client: StoredValue<GameClient, LocalStorage>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let board = client.with_value(GameClient::board);
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (board_init, animate_init, resize_cb_init) =
		(board.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		fit_to_parent(&canvas, &board_init);
		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas has no 2d context");
			return;
		};

		let (board_resize, canvas_resize) = (board_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			fit_to_parent(&canvas_resize, &board_resize);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (board_anim, animate_inner) = (board_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			{
				let mut b = board_anim.borrow_mut();
				b.tick(FRAME_DT);
				render::render(&b, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let board_md = board.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			board_md.borrow_mut().begin_press(x, y);
		}
	};

	let board_mm = board.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			board_mm.borrow_mut().drag_to(x, y);
		}
	};

	let board_mu = board.clone();
	let on_mouseup = move |_: MouseEvent| board_mu.borrow_mut().end_press();

	let board_ml = board.clone();
	let on_mouseleave = move |_: MouseEvent| board_ml.borrow_mut().end_press();

	let board_cl = board.clone();
	let on_click = move |ev: MouseEvent| {
		let hit = canvas_point(canvas_ref, &ev).and_then(|(x, y)| board_cl.borrow().clicked_node(x, y));
		if let Some(id) = hit {
			client.with_value(|c| c.select_node(id));
		}
	};

	let board_wh = board;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			board_wh.borrow_mut().zoom_at(x, y, ev.delta_y() <= 0.0);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="board-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:wheel=on_wheel
			style="display: block; cursor: pointer;"
		/>
	}
}
