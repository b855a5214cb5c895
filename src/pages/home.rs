use leptos::prelude::*;

use crate::api::{Difficulty, MapType};
use crate::client::{GameClient, UiSignals};
use crate::components::board::BoardCanvas;
use crate::components::palette::ColorPalette;
use crate::components::settings_panel::SettingsPanel;
use crate::config::ClientConfig;

fn progress_line(moves: Option<u32>, score: Option<i64>) -> String {
	match (moves, score) {
		(Some(m), Some(s)) => format!("Moves: {m} · Score: {s}"),
		(Some(m), None) => format!("Moves: {m}"),
		(None, Some(s)) => format!("Score: {s}"),
		(None, None) => String::new(),
	}
}

/// The puzzle page: controls, board, palette and settings.
#[component]
pub fn Home() -> impl IntoView {
	let ui = UiSignals::new();
	let client = GameClient::new(ClientConfig::default(), ui);
	client.load_settings();
	client.load_stats();
	let client = StoredValue::new_local(client);

	let (difficulty, set_difficulty) = signal(Difficulty::default());
	let (map_type, set_map_type) = signal(MapType::default());

	let on_new_game = move |_| {
		let (d, m) = (difficulty.get_untracked(), map_type.get_untracked());
		client.with_value(|c| c.new_game(d, m));
	};
	let on_hint = move |_| client.with_value(GameClient::request_hint);

	view! {
		<div class="game-page">
			<header class="controls">
				<h1>"Map Coloring"</h1>
				<label>
					"Difficulty "
					<select
						id="difficulty"
						prop:value=move || difficulty.get().as_str()
						on:change=move |ev| {
							if let Ok(d) = event_target_value(&ev).parse() {
								set_difficulty.set(d);
							}
						}
					>
						{Difficulty::ALL
							.into_iter()
							.map(|d| view! { <option value=d.as_str()>{d.label()}</option> })
							.collect_view()}
					</select>
				</label>
				<label>
					"Map "
					<select
						id="map-type"
						prop:value=move || map_type.get().as_str()
						on:change=move |ev| {
							if let Ok(m) = event_target_value(&ev).parse() {
								set_map_type.set(m);
							}
						}
					>
						{MapType::ALL
							.into_iter()
							.map(|m| view! { <option value=m.as_str()>{m.label()}</option> })
							.collect_view()}
					</select>
				</label>
				<button id="new-game-btn" on:click=on_new_game>"New Game"</button>
				<button
					id="hint-btn"
					on:click=on_hint
					prop:disabled=move || !ui.hint_available.get()
				>
					"Hint"
				</button>
			</header>

			<p
				id="message"
				class="message"
				style:transform=move || {
					if ui.message_pulse.get() { "scale(1.05)" } else { "scale(1)" }
				}
			>
				{move || ui.message.get()}
			</p>
			<p class="progress">{move || progress_line(ui.moves.get(), ui.score.get())}</p>

			<div id="map-container" class="map-container">
				<BoardCanvas client=client />
			</div>
			<ColorPalette client=client colors=ui.colors selected=ui.selected_color />

			<footer class="stats">
				{move || {
					let stats = ui.stats.get();
					match stats.best_score {
						Some(best) => format!("Games completed: {} · Best score: {best}", stats.games_played),
						None => "No completed games yet.".to_string(),
					}
				}}
			</footer>
			<SettingsPanel client=client settings=ui.settings />
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn progress_line_shows_known_counters() {
		assert_eq!(progress_line(Some(4), None), "Moves: 4");
		assert_eq!(progress_line(Some(12), Some(940)), "Moves: 12 · Score: 940");
		assert_eq!(progress_line(None, None), "");
	}
}
