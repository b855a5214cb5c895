//! Finished-game history kept in the browser's `localStorage`.

use log::warn;
use web_sys::Storage;

use crate::api::GameStats;
use crate::error::ClientError;

pub const STATS_KEY: &str = "map_coloring_stats";

/// What the stats footer shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatsSummary {
	pub games_played: usize,
	pub best_score: Option<i64>,
}

/// Appends `entry`, dropping the oldest records beyond `cap`.
pub fn push_stats(history: &mut Vec<GameStats>, entry: GameStats, cap: usize) {
	history.push(entry);
	if history.len() > cap {
		let excess = history.len() - cap;
		history.drain(..excess);
	}
}

/// Games played and best score across `history`.
pub fn summarize(history: &[GameStats]) -> StatsSummary {
	StatsSummary {
		games_played: history.len(),
		best_score: history.iter().map(|s| s.score).max(),
	}
}

fn local_storage() -> Result<Storage, ClientError> {
	web_sys::window()
		.and_then(|w| w.local_storage().ok().flatten())
		.ok_or(ClientError::StorageUnavailable)
}

/// Reads the stored history; a missing key is an empty history.
pub fn load_history() -> Result<Vec<GameStats>, ClientError> {
	let raw = local_storage()?
		.get_item(STATS_KEY)
		.map_err(|_| ClientError::StorageUnavailable)?;
	parse_history(raw.as_deref())
}

fn parse_history(raw: Option<&str>) -> Result<Vec<GameStats>, ClientError> {
	match raw {
		Some(json) => Ok(serde_json::from_str(json)?),
		None => Ok(Vec::new()),
	}
}

/// The loaded history, or a fresh one when it could not be read.
fn history_or_fresh(loaded: Result<Vec<GameStats>, ClientError>) -> Vec<GameStats> {
	loaded.unwrap_or_else(|err| {
		warn!("starting a fresh stats history: {err}");
		Vec::new()
	})
}

fn save_history(history: &[GameStats]) -> Result<(), ClientError> {
	let json = serde_json::to_string(history)?;
	local_storage()?
		.set_item(STATS_KEY, &json)
		.map_err(|_| ClientError::StorageUnavailable)
}

/// Stores one more finished game and returns the updated summary.
pub fn record_game(entry: GameStats, cap: usize) -> Result<StatsSummary, ClientError> {
	// A corrupt history is replaced rather than blocking new records.
	let mut history = history_or_fresh(load_history());
	push_stats(&mut history, entry, cap);
	save_history(&history)?;
	Ok(summarize(&history))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn game(score: i64) -> GameStats {
		GameStats {
			difficulty: "medium".into(),
			moves: 15,
			hints: 1,
			time: 90,
			score,
			date: "2026-10-18T12:00:00".into(),
		}
	}

	#[test]
	fn history_keeps_most_recent_entries() {
		let mut history = Vec::new();
		for score in 0..5 {
			push_stats(&mut history, game(score), 3);
		}
		let scores: Vec<i64> = history.iter().map(|s| s.score).collect();
		assert_eq!(scores, vec![2, 3, 4]);
	}

	#[test]
	fn corrupt_history_is_replaced_by_a_fresh_one() {
		let loaded = parse_history(Some("{not json"));
		assert!(matches!(loaded, Err(ClientError::Decode(_))));
		assert!(history_or_fresh(loaded).is_empty());

		let stored = serde_json::to_string(&[game(300)]).unwrap();
		assert_eq!(history_or_fresh(parse_history(Some(&stored))), vec![game(300)]);
		assert!(parse_history(None).unwrap().is_empty());
	}

	#[test]
	fn summary_reports_best_score() {
		let history = vec![game(720), game(950), game(410)];
		assert_eq!(
			summarize(&history),
			StatsSummary {
				games_played: 3,
				best_score: Some(950),
			}
		);
		assert_eq!(summarize(&[]), StatsSummary::default());
	}
}
