use leptos::prelude::*;

use crate::api::ColorIndex;
use crate::client::GameClient;

/// One clickable swatch per available color; at most one is marked selected.
#[component]
pub fn ColorPalette(
	client: StoredValue<GameClient, LocalStorage>,
	colors: RwSignal<Vec<String>>,
	selected: RwSignal<Option<ColorIndex>>,
) -> impl IntoView {
	view! {
		<div id="color-palette" class="color-palette">
			{move || {
				colors
					.get()
					.into_iter()
					.enumerate()
					.map(|(index, color)| {
						view! {
							<div
								class="color-swatch"
								class:selected=move || selected.get() == Some(index)
								style:background-color=color
								data-color-index=index.to_string()
								on:click=move |_| client.with_value(|c| c.select_color(index))
							/>
						}
					})
					.collect_view()
			}}
		</div>
	}
}
