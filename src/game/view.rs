use crate::api::{ColorIndex, NodeId, PuzzleSnapshot};

/// Display surface driven by [`GameSession`](super::GameSession).
///
/// The canvas board and the page's reactive signals implement this in the
/// app; tests record the calls instead.
pub trait GameView {
	fn render_snapshot(&mut self, snapshot: &PuzzleSnapshot);
	/// Marks at most one node as selected; `None` clears the mark.
	fn highlight_node(&mut self, node: Option<&NodeId>);
	/// Marks at most one swatch as selected; `None` clears the mark.
	fn highlight_color(&mut self, color: Option<ColorIndex>);
	fn apply_node_color(&mut self, node: &NodeId, color: &str);
	fn play_rejection(&mut self, node: &NodeId);
	fn play_celebration(&mut self, colors: &[String]);
	fn flash_hint(&mut self, node: &NodeId);
	fn show_message(&mut self, message: &str);
	fn set_hint_available(&mut self, available: bool);
	fn show_progress(&mut self, _moves: Option<u32>, _score: Option<i64>) {}
}

#[cfg(test)]
pub(crate) mod testing {
	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum ViewEvent {
		Rendered(usize),
		HighlightNode(Option<NodeId>),
		HighlightColor(Option<ColorIndex>),
		Fill(NodeId, String),
		Rejection(NodeId),
		Celebration,
		HintFlash(NodeId),
		Message(String),
		HintAvailable(bool),
		Progress(Option<u32>, Option<i64>),
	}

	#[derive(Debug, Default)]
	pub struct RecordingView {
		pub events: Vec<ViewEvent>,
	}

	impl RecordingView {
		pub fn fills(&self) -> Vec<(NodeId, String)> {
			self.events
				.iter()
				.filter_map(|e| match e {
					ViewEvent::Fill(id, color) => Some((id.clone(), color.clone())),
					_ => None,
				})
				.collect()
		}

		pub fn messages(&self) -> Vec<&str> {
			self.events
				.iter()
				.filter_map(|e| match e {
					ViewEvent::Message(m) => Some(m.as_str()),
					_ => None,
				})
				.collect()
		}

		pub fn saw(&self, event: &ViewEvent) -> bool {
			self.events.contains(event)
		}

		pub fn last_highlighted_node(&self) -> Option<Option<NodeId>> {
			self.events.iter().rev().find_map(|e| match e {
				ViewEvent::HighlightNode(n) => Some(n.clone()),
				_ => None,
			})
		}

		pub fn clear(&mut self) {
			self.events.clear();
		}
	}

	impl GameView for RecordingView {
		fn render_snapshot(&mut self, snapshot: &PuzzleSnapshot) {
			self.events.push(ViewEvent::Rendered(snapshot.nodes.len()));
		}

		fn highlight_node(&mut self, node: Option<&NodeId>) {
			self.events.push(ViewEvent::HighlightNode(node.cloned()));
		}

		fn highlight_color(&mut self, color: Option<ColorIndex>) {
			self.events.push(ViewEvent::HighlightColor(color));
		}

		fn apply_node_color(&mut self, node: &NodeId, color: &str) {
			self.events.push(ViewEvent::Fill(node.clone(), color.to_owned()));
		}

		fn play_rejection(&mut self, node: &NodeId) {
			self.events.push(ViewEvent::Rejection(node.clone()));
		}

		fn play_celebration(&mut self, _colors: &[String]) {
			self.events.push(ViewEvent::Celebration);
		}

		fn flash_hint(&mut self, node: &NodeId) {
			self.events.push(ViewEvent::HintFlash(node.clone()));
		}

		fn show_message(&mut self, message: &str) {
			self.events.push(ViewEvent::Message(message.to_owned()));
		}

		fn set_hint_available(&mut self, available: bool) {
			self.events.push(ViewEvent::HintAvailable(available));
		}

		fn show_progress(&mut self, moves: Option<u32>, score: Option<i64>) {
			self.events.push(ViewEvent::Progress(moves, score));
		}
	}
}
