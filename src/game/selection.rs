//! Pending node/color selection and the one-move-at-a-time dispatch rule.

use log::{debug, warn};

use crate::api::{ColorIndex, MoveRequest, NodeId};

/// The node and color the player has picked but not yet sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
	pub pending_node: Option<NodeId>,
	pub pending_color: Option<ColorIndex>,
}

/// A move that has been handed out for dispatch and not yet resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingMove {
	ticket: u64,
	pub request: MoveRequest,
}

impl PendingMove {
	/// Position of this move in the session's dispatch order.
	pub fn ticket(&self) -> u64 {
		self.ticket
	}
}

/// Owns the session's [`SelectionState`].
///
/// A move is produced when a selection change leaves both a node and a color
/// pending. Only one move is in flight at a time: a pair completed while
/// another move is open is held and handed out by [`apply_color_to_node`]
/// once that move resolves. The node of a resolved move is cleared; the
/// color stays so it can be painted onto several regions in a row.
///
/// [`apply_color_to_node`]: SelectionController::apply_color_to_node
#[derive(Debug, Default)]
pub struct SelectionController {
	state: SelectionState,
	in_flight: Option<u64>,
	next_ticket: u64,
}

impl SelectionController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> &SelectionState {
		&self.state
	}

	/// Whether a dispatched move is still waiting for its response.
	pub fn in_flight(&self) -> bool {
		self.in_flight.is_some()
	}

	/// Makes `id` the pending node. Re-selecting the pending node is a no-op.
	pub fn select_node(&mut self, id: NodeId) -> Option<PendingMove> {
		if self.state.pending_node.as_ref() == Some(&id) {
			return None;
		}
		self.state.pending_node = Some(id);
		self.apply_color_to_node()
	}

	/// Makes `index` the pending color. Re-selecting the pending color is a no-op.
	pub fn select_color(&mut self, index: ColorIndex) -> Option<PendingMove> {
		if self.state.pending_color == Some(index) {
			return None;
		}
		self.state.pending_color = Some(index);
		self.apply_color_to_node()
	}

	/// Hands out a move for the pending pair, unless a field is empty or
	/// another move is still in flight.
	pub fn apply_color_to_node(&mut self) -> Option<PendingMove> {
		let (Some(node), Some(color)) = (&self.state.pending_node, self.state.pending_color) else {
			return None;
		};
		if let Some(ticket) = self.in_flight {
			debug!("move #{ticket} still in flight, holding {node} <- {color}");
			return None;
		}

		let ticket = self.next_ticket;
		self.next_ticket += 1;
		self.in_flight = Some(ticket);
		debug!("dispatching move #{ticket}: {node} <- {color}");
		Some(PendingMove {
			ticket,
			request: MoveRequest {
				node_id: node.clone(),
				color_index: color,
			},
		})
	}

	/// Marks `pending` as answered. Returns `false` for a move that is no
	/// longer the one in flight; its response must be ignored.
	///
	/// The pending node is cleared only if it is still the move's node, so a
	/// region picked while the move was open survives for the next dispatch.
	pub fn resolve(&mut self, pending: &PendingMove) -> bool {
		if self.in_flight != Some(pending.ticket) {
			warn!("discarding stale response for move #{}", pending.ticket);
			return false;
		}
		self.in_flight = None;
		if self.state.pending_node.as_ref() == Some(&pending.request.node_id) {
			self.state.pending_node = None;
		}
		true
	}

	/// Forgets both selections and any in-flight move. Tickets keep counting
	/// so answers to moves from an earlier puzzle are recognised as stale.
	pub fn reset(&mut self) {
		self.state = SelectionState::default();
		self.in_flight = None;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn node(id: &str) -> NodeId {
		NodeId::from(id)
	}

	#[test]
	fn node_then_color_dispatches_once() {
		let mut sel = SelectionController::new();
		assert_eq!(sel.select_node(node("3")), None);

		let pending = sel.select_color(2).unwrap();
		assert_eq!(
			pending.request,
			MoveRequest {
				node_id: node("3"),
				color_index: 2
			}
		);
		assert!(sel.in_flight());
	}

	#[test]
	fn color_then_node_dispatches_once() {
		let mut sel = SelectionController::new();
		assert_eq!(sel.select_color(0), None);
		assert!(sel.select_node(node("1")).is_some());
	}

	#[test]
	fn reselecting_pending_values_never_dispatches() {
		let mut sel = SelectionController::new();
		sel.select_color(1);
		let first = sel.select_node(node("A")).unwrap();

		assert_eq!(sel.select_node(node("A")), None);
		assert_eq!(sel.select_color(1), None);

		assert!(sel.resolve(&first));
		assert_eq!(sel.select_color(1), None);
	}

	#[test]
	fn resolution_clears_node_and_keeps_color() {
		let mut sel = SelectionController::new();
		sel.select_color(3);
		let pending = sel.select_node(node("7")).unwrap();

		assert!(sel.resolve(&pending));
		assert_eq!(
			sel.state(),
			&SelectionState {
				pending_node: None,
				pending_color: Some(3),
			}
		);
		assert!(!sel.in_flight());
	}

	#[test]
	fn sticky_color_applies_to_next_node() {
		let mut sel = SelectionController::new();
		sel.select_color(0);
		let first = sel.select_node(node("a")).unwrap();
		sel.resolve(&first);

		let second = sel.select_node(node("b")).unwrap();
		assert_eq!(second.request.node_id, node("b"));
		assert_eq!(second.request.color_index, 0);
		assert!(second.ticket() > first.ticket());
	}

	#[test]
	fn pair_picked_while_in_flight_is_dispatched_after_resolution() {
		let mut sel = SelectionController::new();
		sel.select_color(0);
		let first = sel.select_node(node("a")).unwrap();

		assert_eq!(sel.select_node(node("b")), None);
		assert_eq!(sel.select_color(1), None);
		assert_eq!(sel.apply_color_to_node(), None);

		assert!(sel.resolve(&first));
		assert_eq!(sel.state().pending_node, Some(node("b")));

		let held = sel.apply_color_to_node().unwrap();
		assert_eq!(
			held.request,
			MoveRequest {
				node_id: node("b"),
				color_index: 1
			}
		);
		assert!(held.ticket() > first.ticket());
	}

	#[test]
	fn recolor_of_the_in_flight_node_is_not_repeated() {
		let mut sel = SelectionController::new();
		sel.select_color(0);
		let first = sel.select_node(node("a")).unwrap();
		assert_eq!(sel.select_color(1), None);

		assert!(sel.resolve(&first));
		assert_eq!(sel.state().pending_node, None);
		assert_eq!(sel.apply_color_to_node(), None);
	}

	#[test]
	fn stale_resolution_is_ignored() {
		let mut sel = SelectionController::new();
		sel.select_color(0);
		let old = sel.select_node(node("a")).unwrap();

		sel.reset();
		sel.select_color(2);
		let current = sel.select_node(node("b")).unwrap();

		assert!(!sel.resolve(&old));
		assert_eq!(sel.state().pending_node, Some(node("b")));
		assert!(sel.in_flight());
		assert!(sel.resolve(&current));
	}

	#[test]
	fn double_resolution_is_ignored() {
		let mut sel = SelectionController::new();
		sel.select_color(0);
		let pending = sel.select_node(node("a")).unwrap();
		assert!(sel.resolve(&pending));
		assert!(!sel.resolve(&pending));
	}

	#[test]
	fn apply_without_both_selections_is_a_no_op() {
		let mut sel = SelectionController::new();
		assert_eq!(sel.apply_color_to_node(), None);
		sel.select_node(node("x"));
		assert_eq!(sel.apply_color_to_node(), None);
		assert!(!sel.in_flight());
	}

	#[test]
	fn reset_clears_both_selections() {
		let mut sel = SelectionController::new();
		sel.select_color(1);
		sel.select_node(node("x"));
		sel.reset();
		assert_eq!(sel.state(), &SelectionState::default());
		assert!(!sel.in_flight());
	}
}
