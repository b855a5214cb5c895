/// Client-side constants that shape the board and the backend connection.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
	/// Prefix for backend endpoints; empty means the page's own origin.
	pub api_base: String,
	/// Radius of a region circle, in pixels.
	pub node_radius: f64,
	/// Allowed board zoom, as (min, max) scale factors.
	pub zoom_extent: (f64, f64),
	/// Finished games kept in the local stats history.
	pub stats_history_cap: usize,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			api_base: String::new(),
			node_radius: 25.0,
			zoom_extent: (0.5, 3.0),
			stats_history_cap: 50,
		}
	}
}
