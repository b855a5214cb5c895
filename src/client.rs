//! Binds the game session to the browser: HTTP service, canvas board and
//! the page's reactive signals.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::api::{
	ColorIndex, Difficulty, GameSettings, HttpPuzzleService, MapType, NodeId, PuzzleService,
	PuzzleSnapshot,
};
use crate::components::board::BoardState;
use crate::config::ClientConfig;
use crate::game::{GameSession, GameView, MoveOutcome, driver};
use crate::storage::{self, StatsSummary};

const MESSAGE_PULSE_MS: u32 = 200;

/// The one live timer that ends the message pulse. Replacing the handle
/// drops, and so cancels, the previous timer.
struct PulseTimer<H>(Option<H>);

impl<H> PulseTimer<H> {
	fn new() -> Self {
		Self(None)
	}

	fn restart(&mut self, handle: H) {
		self.0 = Some(handle);
	}
}

/// Reactive state the page renders outside the canvas.
#[derive(Clone, Copy)]
pub struct UiSignals {
	pub message: RwSignal<String>,
	pub message_pulse: RwSignal<bool>,
	pub hint_available: RwSignal<bool>,
	pub colors: RwSignal<Vec<String>>,
	pub selected_color: RwSignal<Option<ColorIndex>>,
	pub moves: RwSignal<Option<u32>>,
	pub score: RwSignal<Option<i64>>,
	pub settings: RwSignal<GameSettings>,
	pub stats: RwSignal<StatsSummary>,
}

impl UiSignals {
	pub fn new() -> Self {
		Self {
			message: RwSignal::new("Choose a difficulty and start a new game.".to_string()),
			message_pulse: RwSignal::new(false),
			hint_available: RwSignal::new(false),
			colors: RwSignal::new(Vec::new()),
			selected_color: RwSignal::new(None),
			moves: RwSignal::new(None),
			score: RwSignal::new(None),
			settings: RwSignal::new(GameSettings::default()),
			stats: RwSignal::new(StatsSummary::default()),
		}
	}
}

/// [`GameView`] over the canvas board plus the page signals.
struct ClientView {
	board: Rc<RefCell<BoardState>>,
	ui: UiSignals,
	pulse: Rc<RefCell<PulseTimer<Timeout>>>,
}

impl GameView for ClientView {
	fn render_snapshot(&mut self, snapshot: &PuzzleSnapshot) {
		self.board.borrow_mut().render_snapshot(snapshot);
		self.ui.colors.set(snapshot.available_colors.clone());
	}

	fn highlight_node(&mut self, node: Option<&NodeId>) {
		self.board.borrow_mut().highlight_node(node);
	}

	fn highlight_color(&mut self, color: Option<ColorIndex>) {
		self.ui.selected_color.set(color);
	}

	fn apply_node_color(&mut self, node: &NodeId, color: &str) {
		self.board.borrow_mut().apply_node_color(node, color);
	}

	fn play_rejection(&mut self, node: &NodeId) {
		self.board.borrow_mut().play_rejection(node);
	}

	fn play_celebration(&mut self, colors: &[String]) {
		self.board.borrow_mut().play_celebration(colors);
	}

	fn flash_hint(&mut self, node: &NodeId) {
		self.board.borrow_mut().flash_hint(node);
	}

	fn show_message(&mut self, message: &str) {
		self.ui.message.set(message.to_owned());
		self.ui.message_pulse.set(true);
		let pulse = self.ui.message_pulse;
		self.pulse
			.borrow_mut()
			.restart(Timeout::new(MESSAGE_PULSE_MS, move || pulse.set(false)));
	}

	fn set_hint_available(&mut self, available: bool) {
		self.ui.hint_available.set(available);
	}

	fn show_progress(&mut self, moves: Option<u32>, score: Option<i64>) {
		self.ui.moves.set(moves);
		self.ui.score.set(score);
	}
}

/// Cheap handle shared by every event handler on the page.
#[derive(Clone)]
pub struct GameClient {
	config: Rc<ClientConfig>,
	session: Rc<RefCell<GameSession>>,
	board: Rc<RefCell<BoardState>>,
	service: HttpPuzzleService,
	ui: UiSignals,
	pulse: Rc<RefCell<PulseTimer<Timeout>>>,
}

impl GameClient {
	pub fn new(config: ClientConfig, ui: UiSignals) -> Self {
		Self {
			service: HttpPuzzleService::new(config.api_base.clone()),
			board: Rc::new(RefCell::new(BoardState::new(&config))),
			session: Rc::new(RefCell::new(GameSession::new())),
			config: Rc::new(config),
			ui,
			pulse: Rc::new(RefCell::new(PulseTimer::new())),
		}
	}

	pub fn board(&self) -> Rc<RefCell<BoardState>> {
		self.board.clone()
	}

	fn view(&self) -> ClientView {
		ClientView {
			board: self.board.clone(),
			ui: self.ui,
			pulse: self.pulse.clone(),
		}
	}

	pub fn new_game(&self, difficulty: Difficulty, map_type: MapType) {
		let this = self.clone();
		spawn_local(async move {
			let mut view = this.view();
			driver::start_new_game(&this.session, &this.service, &mut view, difficulty, map_type)
				.await;
		});
	}

	pub fn select_node(&self, id: NodeId) {
		let this = self.clone();
		spawn_local(async move {
			let mut view = this.view();
			let outcome = driver::select_node(&this.session, &this.service, &mut view, id).await;
			this.after_move(outcome).await;
		});
	}

	pub fn select_color(&self, index: ColorIndex) {
		let this = self.clone();
		spawn_local(async move {
			let mut view = this.view();
			let outcome = driver::select_color(&this.session, &this.service, &mut view, index).await;
			this.after_move(outcome).await;
		});
	}

	pub fn request_hint(&self) {
		let this = self.clone();
		spawn_local(async move {
			let mut view = this.view();
			driver::request_hint(&this.session, &this.service, &mut view).await;
		});
	}

	async fn after_move(&self, outcome: Option<MoveOutcome>) {
		if outcome != Some(MoveOutcome::Completed) {
			return;
		}
		match self.service.game_stats().await {
			Ok(stats) => {
				info!("finished in {} moves, score {}", stats.moves, stats.score);
				match storage::record_game(stats, self.config.stats_history_cap) {
					Ok(summary) => self.ui.stats.set(summary),
					Err(err) => warn!("could not store game stats: {err}"),
				}
			}
			Err(err) => warn!("could not fetch game stats: {err}"),
		}
	}

	pub fn load_stats(&self) {
		match storage::load_history() {
			Ok(history) => self.ui.stats.set(storage::summarize(&history)),
			Err(err) => warn!("could not read game stats: {err}"),
		}
	}

	pub fn load_settings(&self) {
		let this = self.clone();
		spawn_local(async move {
			let settings = this.service.load_settings().await.unwrap_or_else(|err| {
				warn!("using default settings: {err}");
				GameSettings::default()
			});
			this.apply_settings(settings);
		});
	}

	/// Applies a settings change locally, then persists it in the background.
	pub fn update_settings(&self, update: impl FnOnce(&mut GameSettings)) {
		let mut settings = self.ui.settings.get_untracked();
		update(&mut settings);
		self.apply_settings(settings.clone());

		let service = self.service.clone();
		spawn_local(async move {
			if let Err(err) = service.save_settings(&settings).await {
				warn!("could not save settings: {err}");
			}
		});
	}

	fn apply_settings(&self, settings: GameSettings) {
		self.board.borrow_mut().settings = settings.clone();
		self.ui.settings.set(settings);
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::PulseTimer;

	struct Handle(Rc<Cell<u32>>);

	impl Drop for Handle {
		fn drop(&mut self) {
			self.0.set(self.0.get() + 1);
		}
	}

	#[test]
	fn newer_message_cancels_the_pending_pulse_end() {
		let cancelled = Rc::new(Cell::new(0));
		let mut timer = PulseTimer::new();

		timer.restart(Handle(cancelled.clone()));
		assert_eq!(cancelled.get(), 0);

		timer.restart(Handle(cancelled.clone()));
		assert_eq!(cancelled.get(), 1);
		assert!(timer.0.is_some());
	}
}
