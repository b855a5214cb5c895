//! Request/response round trips against a [`PuzzleService`].
//!
//! Each driver borrows the session only around the synchronous steps, never
//! across the `.await`, so UI events keep flowing while a request is open.

use std::cell::RefCell;

use super::selection::PendingMove;
use super::session::{GameSession, MoveOutcome};
use super::view::GameView;
use crate::api::{ColorIndex, Difficulty, MapType, NodeId, PuzzleService};

pub async fn start_new_game<S: PuzzleService, V: GameView>(
	session: &RefCell<GameSession>,
	service: &S,
	view: &mut V,
	difficulty: Difficulty,
	map_type: MapType,
) {
	let ticket = session
		.borrow_mut()
		.begin_new_game(difficulty, map_type, view);
	let result = service.new_game(&ticket.request).await;
	session.borrow_mut().finish_new_game(&ticket, result, view);
}

/// Selects a region; if that completes a node/color pair, sends the move.
/// Returns `None` when nothing was dispatched.
pub async fn select_node<S: PuzzleService, V: GameView>(
	session: &RefCell<GameSession>,
	service: &S,
	view: &mut V,
	id: NodeId,
) -> Option<MoveOutcome> {
	let pending = session.borrow_mut().select_node(id, view)?;
	Some(send_moves(session, service, view, pending).await)
}

/// Selects a swatch; if that completes a node/color pair, sends the move.
pub async fn select_color<S: PuzzleService, V: GameView>(
	session: &RefCell<GameSession>,
	service: &S,
	view: &mut V,
	index: ColorIndex,
) -> Option<MoveOutcome> {
	let pending = session.borrow_mut().select_color(index, view)?;
	Some(send_moves(session, service, view, pending).await)
}

/// Sends `pending`, then any pair picked while it was in flight, and
/// returns the outcome of the last move sent.
async fn send_moves<S: PuzzleService, V: GameView>(
	session: &RefCell<GameSession>,
	service: &S,
	view: &mut V,
	mut pending: PendingMove,
) -> MoveOutcome {
	loop {
		let result = service.apply_move(&pending.request).await;
		let outcome = session.borrow_mut().finish_move(&pending, result, view);
		if outcome == MoveOutcome::Stale {
			return outcome;
		}
		match session.borrow_mut().held_move() {
			Some(next) => pending = next,
			None => return outcome,
		}
	}
}

pub async fn request_hint<S: PuzzleService, V: GameView>(
	session: &RefCell<GameSession>,
	service: &S,
	view: &mut V,
) {
	let Some(ticket) = session.borrow().begin_hint() else {
		return;
	};
	let result = service.request_hint().await;
	session.borrow_mut().finish_hint(ticket, result, view);
}
