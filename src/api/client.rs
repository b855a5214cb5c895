use gloo_net::http::{Request, Response};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
	ErrorBody, GameSettings, GameStats, HintResponse, MoveRequest, MoveResult, NewGameRequest,
	PuzzleSnapshot,
};
use crate::error::ClientError;

/// The puzzle backend: generation, move validation, hints and session storage.
#[allow(async_fn_in_trait)]
pub trait PuzzleService {
	async fn new_game(&self, request: &NewGameRequest) -> Result<PuzzleSnapshot, ClientError>;
	async fn apply_move(&self, request: &MoveRequest) -> Result<MoveResult, ClientError>;
	async fn request_hint(&self) -> Result<HintResponse, ClientError>;
	async fn load_settings(&self) -> Result<GameSettings, ClientError>;
	async fn save_settings(&self, settings: &GameSettings) -> Result<(), ClientError>;
	async fn game_stats(&self) -> Result<GameStats, ClientError>;
}

/// JSON-over-HTTP client for the puzzle backend.
#[derive(Clone, Debug)]
pub struct HttpPuzzleService {
	base: String,
}

impl HttpPuzzleService {
	/// `base` is prefixed to every endpoint path; empty means same origin.
	pub fn new(base: impl Into<String>) -> Self {
		Self {
			base: base.into().trim_end_matches('/').to_owned(),
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base, path)
	}

	async fn post<B: Serialize, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
	) -> Result<T, ClientError> {
		debug!("POST {path}");
		let response = Request::post(&self.url(path)).json(body)?.send().await?;
		decode(response).await
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
		debug!("GET {path}");
		let response = Request::get(&self.url(path)).send().await?;
		decode(response).await
	}
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
	let status = response.status();
	let text = response.text().await?;
	if !response.ok() {
		return Err(status_error(status, response.status_text(), &text));
	}
	Ok(serde_json::from_str(&text)?)
}

/// Error for a non-2xx reply: the body's `{"error": ...}` message when there
/// is one, otherwise the HTTP status text.
fn status_error(status: u16, status_text: String, body: &str) -> ClientError {
	let message = serde_json::from_str::<ErrorBody>(body)
		.map(|body| body.error)
		.unwrap_or(status_text);
	ClientError::Status { status, message }
}

#[derive(Serialize)]
struct Empty {}

#[derive(serde::Deserialize)]
struct SaveAck {
	#[serde(default)]
	success: bool,
}

impl PuzzleService for HttpPuzzleService {
	async fn new_game(&self, request: &NewGameRequest) -> Result<PuzzleSnapshot, ClientError> {
		self.post("/new_game", request).await
	}

	async fn apply_move(&self, request: &MoveRequest) -> Result<MoveResult, ClientError> {
		self.post("/color_node", request).await
	}

	async fn request_hint(&self) -> Result<HintResponse, ClientError> {
		self.post("/hint", &Empty {}).await
	}

	async fn load_settings(&self) -> Result<GameSettings, ClientError> {
		self.get("/get_settings").await
	}

	async fn save_settings(&self, settings: &GameSettings) -> Result<(), ClientError> {
		let ack: SaveAck = self.post("/save_settings", settings).await?;
		if ack.success {
			Ok(())
		} else {
			Err(ClientError::Status {
				status: 200,
				message: "settings were not saved".into(),
			})
		}
	}

	async fn game_stats(&self) -> Result<GameStats, ClientError> {
		self.get("/get_game_stats").await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn status_parts(err: ClientError) -> Option<(u16, String)> {
		match err {
			ClientError::Status { status, message } => Some((status, message)),
			_ => None,
		}
	}

	#[test]
	fn error_body_message_is_kept() {
		let err = status_error(400, "Bad Request".into(), r#"{"error": "No active game"}"#);
		assert_eq!(status_parts(err), Some((400, "No active game".to_string())));
	}

	#[test]
	fn non_json_error_falls_back_to_status_text() {
		let err = status_error(502, "Bad Gateway".into(), "<html>upstream down</html>");
		assert_eq!(status_parts(err), Some((502, "Bad Gateway".to_string())));

		let err = status_error(500, "Internal Server Error".into(), r#"{"detail": "x"}"#);
		assert_eq!(status_parts(err), Some((500, "Internal Server Error".to_string())));
	}

	#[test]
	fn base_path_is_joined_without_double_slash() {
		let service = HttpPuzzleService::new("/api/");
		assert_eq!(service.url("/hint"), "/api/hint");
		assert_eq!(HttpPuzzleService::new("").url("/new_game"), "/new_game");
	}
}
