use thiserror::Error;

/// Failures talking to the puzzle backend or the browser.
///
/// A rejected move (`valid: false`) is a normal response, not one of these.
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("request failed: {0}")]
	Transport(#[from] gloo_net::Error),

	#[error("server responded {status}: {message}")]
	Status { status: u16, message: String },

	#[error("unexpected response body: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("local storage is unavailable")]
	StorageUnavailable,
}

/// A select box or query value that names no known option.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown option `{0}`")]
pub struct UnknownOption(pub String);
