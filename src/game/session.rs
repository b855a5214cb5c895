use log::{error, info, warn};

use super::selection::{PendingMove, SelectionController};
use super::view::GameView;
use crate::api::{
	ColorIndex, Difficulty, HintResponse, MapType, MoveResult, NewGameRequest, NodeColors, NodeId,
	PuzzleSnapshot,
};
use crate::error::ClientError;

pub const NEW_GAME_FAILED: &str = "Error starting new game. Please try again.";
pub const MOVE_FAILED: &str = "Error applying color. Please try again.";
pub const HINT_FAILED: &str = "Error getting hint. Please try again.";

/// How a dispatched move ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
	Accepted,
	Completed,
	Rejected,
	Failed,
	/// The answer belonged to a move that is no longer in flight.
	Stale,
}

/// A new-game request tied to the puzzle generation it will replace.
#[derive(Clone, Debug)]
pub struct NewGameTicket {
	generation: u64,
	pub request: NewGameRequest,
}

/// A hint request tied to the puzzle it was asked for.
#[derive(Clone, Copy, Debug)]
pub struct HintTicket {
	generation: u64,
}

/// State of one puzzle as confirmed by the backend, plus the local selection.
///
/// Every generation bump (new game) invalidates replies that were requested
/// for the previous puzzle.
#[derive(Debug, Default)]
pub struct GameSession {
	selection: SelectionController,
	snapshot: Option<PuzzleSnapshot>,
	generation: u64,
	hint_available: bool,
	complete: bool,
}

impl GameSession {
	pub fn new() -> Self {
		Self::default()
	}

	/// Read access to the pending node/color pair.
	pub fn selection(&self) -> &SelectionController {
		&self.selection
	}

	pub fn snapshot(&self) -> Option<&PuzzleSnapshot> {
		self.snapshot.as_ref()
	}

	pub fn hint_available(&self) -> bool {
		self.hint_available
	}

	pub fn is_complete(&self) -> bool {
		self.complete
	}

	/// Invalidates the running puzzle and builds the request for the next one.
	pub fn begin_new_game(
		&mut self,
		difficulty: Difficulty,
		map_type: MapType,
		view: &mut impl GameView,
	) -> NewGameTicket {
		self.generation += 1;
		self.selection.reset();
		self.complete = false;
		self.hint_available = false;
		view.highlight_node(None);
		view.highlight_color(None);
		view.set_hint_available(false);
		NewGameTicket {
			generation: self.generation,
			request: NewGameRequest {
				difficulty,
				map_type,
			},
		}
	}

	/// Shows the new puzzle, unless a later new game superseded this one.
	pub fn finish_new_game(
		&mut self,
		ticket: &NewGameTicket,
		result: Result<PuzzleSnapshot, ClientError>,
		view: &mut impl GameView,
	) {
		if ticket.generation != self.generation {
			warn!("discarding puzzle for superseded game #{}", ticket.generation);
			return;
		}
		match result {
			Ok(snapshot) => {
				info!(
					"new {} game: {} regions, {} borders, {} colors",
					ticket.request.difficulty.as_str(),
					snapshot.nodes.len(),
					snapshot.edges.len(),
					snapshot.available_colors.len()
				);
				view.render_snapshot(&snapshot);
				view.show_message(&snapshot.message);
				view.show_progress(None, None);
				self.hint_available = true;
				view.set_hint_available(true);
				self.snapshot = Some(snapshot);
			}
			Err(err) => {
				error!("Error starting new game: {err}");
				view.show_message(NEW_GAME_FAILED);
			}
		}
	}

	/// Handles a click on region `id`; returns the move to send, if any.
	pub fn select_node(&mut self, id: NodeId, view: &mut impl GameView) -> Option<PendingMove> {
		if !self.snapshot.as_ref().is_some_and(|s| s.contains(&id)) {
			warn!("ignoring click on unknown region {id}");
			return None;
		}
		view.highlight_node(Some(&id));
		self.selection.select_node(id)
	}

	/// Handles a click on swatch `index`; returns the move to send, if any.
	pub fn select_color(
		&mut self,
		index: ColorIndex,
		view: &mut impl GameView,
	) -> Option<PendingMove> {
		if self.snapshot.as_ref().and_then(|s| s.color(index)).is_none() {
			warn!("ignoring unknown color #{index}");
			return None;
		}
		view.highlight_color(Some(index));
		self.selection.select_color(index)
	}

	/// Applies the backend's answer to `pending` and reports how it ended.
	pub fn finish_move(
		&mut self,
		pending: &PendingMove,
		result: Result<MoveResult, ClientError>,
		view: &mut impl GameView,
	) -> MoveOutcome {
		if !self.selection.resolve(pending) {
			return MoveOutcome::Stale;
		}

		let outcome = match result {
			Ok(result) if result.valid => {
				if let Some(colors) = &result.node_colors {
					self.apply_node_colors(colors, view);
				}
				view.show_message(&result.message);
				view.show_progress(result.moves, result.score);
				if result.game_complete.unwrap_or(false) {
					self.complete_game(view);
					MoveOutcome::Completed
				} else {
					MoveOutcome::Accepted
				}
			}
			Ok(result) => {
				view.show_message(&result.message);
				view.play_rejection(&pending.request.node_id);
				MoveOutcome::Rejected
			}
			Err(err) => {
				error!("Error applying color: {err}");
				view.show_message(MOVE_FAILED);
				MoveOutcome::Failed
			}
		};
		// A region picked while the move was open keeps its highlight.
		view.highlight_node(self.selection.state().pending_node.as_ref());
		outcome
	}

	/// The pair completed while the last move was in flight, ready to send.
	/// `None` once the puzzle is solved or when nothing was held.
	pub fn held_move(&mut self) -> Option<PendingMove> {
		if self.complete {
			return None;
		}
		self.selection.apply_color_to_node()
	}

	fn apply_node_colors(&mut self, colors: &NodeColors, view: &mut impl GameView) {
		let Some(snapshot) = self.snapshot.as_mut() else {
			return;
		};
		for (id, index) in colors {
			let Some(index) = *index else {
				continue;
			};
			match snapshot.available_colors.get(index) {
				Some(color) => view.apply_node_color(id, color),
				None => {
					warn!("region {id} assigned unknown color #{index}");
					continue;
				}
			}
			snapshot.node_colors.insert(id.clone(), Some(index));
		}
	}

	fn complete_game(&mut self, view: &mut impl GameView) {
		info!("puzzle complete");
		self.complete = true;
		self.hint_available = false;
		self.selection.reset();
		let colors = self
			.snapshot
			.as_ref()
			.map(|s| s.available_colors.as_slice())
			.unwrap_or_default();
		view.play_celebration(colors);
		view.highlight_color(None);
		view.set_hint_available(false);
	}

	/// `None` when no puzzle is running or the current one is solved.
	pub fn begin_hint(&self) -> Option<HintTicket> {
		self.hint_available.then_some(HintTicket {
			generation: self.generation,
		})
	}

	/// Shows the hint message and flashes the hinted region, if it exists.
	pub fn finish_hint(
		&mut self,
		ticket: HintTicket,
		result: Result<HintResponse, ClientError>,
		view: &mut impl GameView,
	) {
		if ticket.generation != self.generation {
			warn!("discarding hint for superseded game #{}", ticket.generation);
			return;
		}
		match result {
			Ok(hint) => {
				view.show_message(&hint.message);
				let known = |id: &NodeId| self.snapshot.as_ref().is_some_and(|s| s.contains(id));
				if let Some(node) = hint.hint_node.as_ref().filter(|id| known(*id)) {
					view.flash_hint(node);
				}
			}
			Err(err) => {
				error!("Error getting hint: {err}");
				view.show_message(HINT_FAILED);
			}
		}
	}
}
