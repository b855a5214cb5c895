use leptos::prelude::*;

use crate::api::{AnimationSpeed, GameSettings};
use crate::client::GameClient;

#[component]
pub fn SettingsPanel(
	client: StoredValue<GameClient, LocalStorage>,
	settings: RwSignal<GameSettings>,
) -> impl IntoView {
	let on_colorblind = move |ev: web_sys::Event| {
		let checked = event_target_checked(&ev);
		client.with_value(|c| c.update_settings(|s| s.colorblind_mode = checked));
	};
	let on_labels = move |ev: web_sys::Event| {
		let checked = event_target_checked(&ev);
		client.with_value(|c| c.update_settings(|s| s.show_node_labels = checked));
	};
	let on_speed = move |ev: web_sys::Event| {
		if let Ok(speed) = event_target_value(&ev).parse::<AnimationSpeed>() {
			client.with_value(|c| c.update_settings(|s| s.animation_speed = speed));
		}
	};

	view! {
		<details class="settings-panel">
			<summary>"Settings"</summary>
			<label>
				<input
					type="checkbox"
					prop:checked=move || settings.with(|s| s.colorblind_mode)
					on:change=on_colorblind
				/>
				" Colorblind mode"
			</label>
			<label>
				<input
					type="checkbox"
					prop:checked=move || settings.with(|s| s.show_node_labels)
					on:change=on_labels
				/>
				" Show region labels"
			</label>
			<label>
				"Animation speed "
				<select
					prop:value=move || settings.with(|s| s.animation_speed.as_str())
					on:change=on_speed
				>
					{AnimationSpeed::ALL
						.into_iter()
						.map(|speed| view! { <option value=speed.as_str()>{speed.as_str()}</option> })
						.collect_view()}
				</select>
			</label>
		</details>
	}
}
