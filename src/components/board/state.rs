use std::collections::{BTreeMap, HashMap};

use super::animation::{Celebration, HintFlash, Lcg, Shake};
use crate::api::{ColorIndex, GameSettings, NodeId, PuzzleSnapshot, RawPosition};
use crate::config::ClientConfig;
use crate::game::normalize_positions;

pub const UNCOLORED_FILL: &str = "#E8E8E8";
const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug)]
pub struct BoardNode {
	pub id: NodeId,
	pub x: f64,
	pub y: f64,
	pub fill: String,
	pub color_index: Option<ColorIndex>,
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Set once a press has travelled far enough to count as a drag, so
	/// the click that ends it does not select a region.
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Everything the canvas needs to draw one frame of the puzzle.
pub struct BoardState {
	pub nodes: Vec<BoardNode>,
	pub edges: Vec<(usize, usize)>,
	pub colors: Vec<String>,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub selected: Option<usize>,
	pub hint: Option<HintFlash>,
	pub shake: Option<Shake>,
	pub celebration: Celebration,
	pub settings: GameSettings,
	pub width: f64,
	pub height: f64,
	pub radius: f64,
	zoom_extent: (f64, f64),
	raw_positions: BTreeMap<NodeId, RawPosition>,
	index: HashMap<NodeId, usize>,
	rng: Lcg,
}

impl BoardState {
	pub fn new(config: &ClientConfig) -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			colors: Vec::new(),
			transform: ViewTransform::default(),
			pan: PanState::default(),
			selected: None,
			hint: None,
			shake: None,
			celebration: Celebration::default(),
			settings: GameSettings::default(),
			width: 0.0,
			height: 0.0,
			radius: config.node_radius,
			zoom_extent: config.zoom_extent,
			raw_positions: BTreeMap::new(),
			index: HashMap::new(),
			rng: Lcg::new(1),
		}
	}

	/// Replaces the board with a fresh puzzle and resets zoom and effects.
	pub fn render_snapshot(&mut self, snapshot: &PuzzleSnapshot) {
		self.raw_positions = snapshot.positions.clone();
		self.colors = snapshot.available_colors.clone();
		self.index.clear();
		self.nodes = snapshot
			.nodes
			.iter()
			.filter(|n| self.raw_positions.contains_key(&n.id))
			.enumerate()
			.map(|(i, n)| {
				self.index.insert(n.id.clone(), i);
				let color_index = snapshot.node_colors.get(&n.id).copied().flatten();
				let fill = color_index
					.and_then(|c| snapshot.color(c))
					.unwrap_or(UNCOLORED_FILL)
					.to_owned();
				BoardNode {
					id: n.id.clone(),
					x: 0.0,
					y: 0.0,
					fill,
					color_index,
				}
			})
			.collect();
		self.edges = snapshot
			.edges
			.iter()
			.filter_map(|e| Some((*self.index.get(&e.source)?, *self.index.get(&e.target)?)))
			.collect();
		self.transform = ViewTransform::default();
		self.pan = PanState::default();
		self.selected = None;
		self.hint = None;
		self.shake = None;
		self.celebration = Celebration::default();
		self.layout();
	}

	fn layout(&mut self) {
		let fitted = normalize_positions(&self.raw_positions, self.width, self.height, self.radius);
		for node in &mut self.nodes {
			if let Some(p) = fitted.get(&node.id) {
				node.x = p.x;
				node.y = p.y;
			}
		}
	}

	pub fn node_index(&self, id: &NodeId) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn highlight_node(&mut self, id: Option<&NodeId>) {
		self.selected = id.and_then(|id| self.node_index(id));
	}

	pub fn apply_node_color(&mut self, id: &NodeId, color: &str) {
		let color_index = self.colors.iter().position(|c| c == color);
		if let Some(node) = self.node_index(id).map(|i| &mut self.nodes[i]) {
			node.fill = color.to_owned();
			node.color_index = color_index;
		}
	}

	pub fn play_rejection(&mut self, id: &NodeId) {
		self.shake = self.node_index(id).map(Shake::new);
	}

	pub fn flash_hint(&mut self, id: &NodeId) {
		self.hint = self.node_index(id).map(HintFlash::new);
	}

	pub fn play_celebration(&mut self, colors: &[String]) {
		self.celebration = Celebration::burst(
			colors,
			self.width,
			self.height,
			self.duration_scale(),
			&mut self.rng,
		);
	}

	pub fn duration_scale(&self) -> f64 {
		self.settings.animation_speed.duration_scale()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen point (later nodes are drawn above earlier ones).
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.nodes
			.iter()
			.rposition(|n| (n.x - gx).hypot(n.y - gy) <= self.radius)
	}

	pub fn begin_press(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: self.node_at_position(sx, sy).is_none(),
			moved: false,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
		if dx.hypot(dy) > CLICK_SLOP {
			self.pan.moved = true;
		}
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
	}

	pub fn end_press(&mut self) {
		self.pan.active = false;
	}

	/// Node hit by a click, unless the click finished a pan.
	pub fn clicked_node(&self, sx: f64, sy: f64) -> Option<NodeId> {
		if self.pan.moved {
			return None;
		}
		self.node_at_position(sx, sy).map(|i| self.nodes[i].id.clone())
	}

	/// Zooms around a screen point; `zoom_in` picks the direction.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		let (min, max) = self.zoom_extent;
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(min, max);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f64) {
		let scale = self.duration_scale();
		if let Some(hint) = &mut self.hint {
			hint.advance(dt);
			if hint.finished(scale) {
				self.hint = None;
			}
		}
		if let Some(shake) = &mut self.shake {
			shake.advance(dt);
			if shake.finished(scale) {
				self.shake = None;
			}
		}
		self.celebration.advance(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.layout();
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::api::{EdgeEntry, NodeEntry};

	fn board() -> BoardState {
		let mut board = BoardState::new(&ClientConfig::default());
		board.resize(100.0, 100.0);
		let snapshot = PuzzleSnapshot {
			nodes: ["A", "B", "C"].iter().map(|&n| NodeEntry { id: n.into() }).collect(),
			edges: vec![
				EdgeEntry {
					source: "A".into(),
					target: "B".into(),
				},
				EdgeEntry {
					source: "A".into(),
					target: "ghost".into(),
				},
			],
			positions: [("A", 0.0, 0.0), ("B", 10.0, 0.0), ("C", 0.0, 10.0)]
				.iter()
				.map(|&(n, x, y)| (NodeId::from(n), RawPosition { x, y }))
				.collect(),
			available_colors: vec!["#fff".into(), "#000".into()],
			node_colors: BTreeMap::from([(NodeId::from("C"), Some(0))]),
			message: String::new(),
		};
		board.render_snapshot(&snapshot);
		board
	}

	fn position(board: &BoardState, id: &str) -> (f64, f64) {
		let node = &board.nodes[board.node_index(&id.into()).unwrap()];
		(node.x, node.y)
	}

	#[test]
	fn snapshot_is_laid_out_inside_the_viewport() {
		let board = board();
		assert_eq!(position(&board, "A"), (25.0, 25.0));
		assert_eq!(position(&board, "B"), (75.0, 25.0));
		assert_eq!(position(&board, "C"), (25.0, 75.0));
		assert_eq!(board.edges, vec![(0, 1)]);
	}

	#[test]
	fn initial_colors_come_from_snapshot() {
		let board = board();
		assert_eq!(board.nodes[0].fill, UNCOLORED_FILL);
		assert_eq!(board.nodes[2].fill, "#fff");
		assert_eq!(board.nodes[2].color_index, Some(0));
	}

	#[test]
	fn resize_refits_positions() {
		let mut board = board();
		board.resize(200.0, 100.0);
		assert_eq!(position(&board, "B"), (175.0, 25.0));
	}

	#[test]
	fn fill_and_selection_follow_ids() {
		let mut board = board();
		board.apply_node_color(&"A".into(), "#000");
		board.highlight_node(Some(&"B".into()));

		assert_eq!(board.nodes[0].fill, "#000");
		assert_eq!(board.nodes[0].color_index, Some(1));
		assert_eq!(board.selected, Some(1));

		board.highlight_node(None);
		assert_eq!(board.selected, None);
	}

	#[test]
	fn hit_testing_respects_pan_and_zoom() {
		let mut board = board();
		assert_eq!(board.node_at_position(75.0, 30.0), Some(1));
		assert_eq!(board.node_at_position(50.0, 50.0), None);

		board.transform = ViewTransform {
			x: 10.0,
			y: 0.0,
			k: 2.0,
		};
		assert_eq!(board.node_at_position(60.0, 50.0), Some(0));
	}

	#[test]
	fn drag_on_background_pans_and_swallows_click() {
		let mut board = board();
		board.begin_press(50.0, 50.0);
		board.drag_to(70.0, 40.0);
		board.end_press();

		assert_eq!((board.transform.x, board.transform.y), (20.0, -10.0));
		assert_eq!(board.clicked_node(95.0, 15.0), None);

		board.begin_press(95.0, 15.0);
		board.end_press();
		assert_eq!(board.clicked_node(95.0, 15.0), Some(NodeId::from("B")));
	}

	#[test]
	fn press_on_node_does_not_pan() {
		let mut board = board();
		board.begin_press(25.0, 25.0);
		board.drag_to(60.0, 60.0);
		assert_eq!(board.transform.x, 0.0);
		assert_eq!(board.clicked_node(25.0, 25.0), Some(NodeId::from("A")));
	}

	#[test]
	fn zoom_is_clamped() {
		let mut board = board();
		for _ in 0..50 {
			board.zoom_at(50.0, 50.0, true);
		}
		assert_eq!(board.transform.k, 3.0);
		for _ in 0..50 {
			board.zoom_at(50.0, 50.0, false);
		}
		assert_eq!(board.transform.k, 0.5);
	}

	#[test]
	fn effects_expire_on_tick() {
		let mut board = board();
		board.flash_hint(&"C".into());
		board.play_rejection(&"A".into());
		board.play_celebration(&["#fff".to_string()]);
		assert_eq!(board.hint.as_ref().map(|h| h.node), Some(2));
		assert_eq!(board.shake.as_ref().map(|s| s.node), Some(0));
		assert!(!board.celebration.is_empty());

		for _ in 0..250 {
			board.tick(0.016);
		}
		assert!(board.hint.is_none());
		assert!(board.shake.is_none());
		assert!(board.celebration.is_empty());
	}

	#[test]
	fn unknown_ids_are_ignored() {
		let mut board = board();
		board.flash_hint(&"nope".into());
		board.apply_node_color(&"nope".into(), "#000");
		assert!(board.hint.is_none());
		assert!(board.nodes.iter().all(|n| n.fill != "#000"));
	}
}
