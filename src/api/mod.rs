mod client;
mod types;

pub use client::{HttpPuzzleService, PuzzleService};
pub use types::{
	AnimationSpeed, ColorIndex, Difficulty, EdgeEntry, GameSettings, GameStats, HintResponse,
	MapType, MoveRequest, MoveResult, NewGameRequest, NodeColors, NodeEntry, NodeId,
	PuzzleSnapshot, RawPosition,
};
