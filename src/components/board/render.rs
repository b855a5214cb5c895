use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::animation::{DEFAULT_OUTLINE, SELECTED_OUTLINE};
use super::state::BoardState;

const BACKGROUND: &str = "#FAFAFA";
const BORDER: &str = "#555";
const SELECTED_DASH: (f64, f64) = (6.0, 3.0);

pub fn render(state: &BoardState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	// Confetti falls in screen space, outside the pan/zoom transform.
	draw_confetti(state, ctx);
}

fn draw_edges(state: &BoardState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(BORDER);
	ctx.set_line_width(2.0);
	ctx.begin_path();
	for &(a, b) in &state.edges {
		let (n1, n2) = (&state.nodes[a], &state.nodes[b]);
		ctx.move_to(n1.x, n1.y);
		ctx.line_to(n2.x, n2.y);
	}
	ctx.stroke();
}

fn draw_nodes(state: &BoardState, ctx: &CanvasRenderingContext2d) {
	let scale = state.duration_scale();
	let shake = state
		.shake
		.as_ref()
		.map(|s| (s.node, s.offset(scale)));

	for (idx, node) in state.nodes.iter().enumerate() {
		let dx = match shake {
			Some((n, offset)) if n == idx => offset,
			_ => 0.0,
		};
		let (x, y) = (node.x + dx, node.y);

		let outline = match &state.hint {
			Some(hint) if hint.node == idx => hint.outline(scale),
			_ if state.selected == Some(idx) => SELECTED_OUTLINE,
			_ => DEFAULT_OUTLINE,
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, state.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.fill);
		ctx.fill();
		// Colorblind mode also dashes the selection so it does not rely on shade.
		let dashed = state.settings.colorblind_mode && state.selected == Some(idx);
		if dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(SELECTED_DASH.0),
				&JsValue::from_f64(SELECTED_DASH.1),
			));
		}
		ctx.set_stroke_style_str(&outline.css());
		ctx.set_line_width(outline.width);
		ctx.stroke();
		if dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		ctx.set_fill_style_str("#222");
		ctx.set_text_align("center");
		if state.settings.show_node_labels {
			ctx.set_font("bold 12px sans-serif");
			let _ = ctx.fill_text(node.id.as_str(), x, y + 5.0);
		}
		// Colorblind mode: number the color so it reads without hue.
		if let Some(c) = node.color_index.filter(|_| state.settings.colorblind_mode) {
			ctx.set_font("10px sans-serif");
			let _ = ctx.fill_text(&(c + 1).to_string(), x, y + state.radius * 0.7);
		}
	}
}

fn draw_confetti(state: &BoardState, ctx: &CanvasRenderingContext2d) {
	for piece in &state.celebration.pieces {
		ctx.begin_path();
		let _ = ctx.arc(piece.x, piece.y, piece.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&piece.color);
		ctx.fill();
	}
}
