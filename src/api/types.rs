use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownOption;

/// Region identifier as sent by the backend (always a string on the wire).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self(id.to_owned())
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Index into `PuzzleSnapshot::available_colors`.
pub type ColorIndex = usize;

/// Assigned color per node; `None` means the region is still uncolored.
pub type NodeColors = BTreeMap<NodeId, Option<ColorIndex>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
	Easy,
	#[default]
	Medium,
	Hard,
}

impl Difficulty {
	pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Easy => "easy",
			Self::Medium => "medium",
			Self::Hard => "hard",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Easy => "Easy",
			Self::Medium => "Medium",
			Self::Hard => "Hard",
		}
	}
}

impl FromStr for Difficulty {
	type Err = UnknownOption;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|d| d.as_str() == s)
			.ok_or_else(|| UnknownOption(s.to_owned()))
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
	#[default]
	Random,
	Grid,
	Voronoi,
}

impl MapType {
	pub const ALL: [MapType; 3] = [Self::Random, Self::Grid, Self::Voronoi];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Random => "random",
			Self::Grid => "grid",
			Self::Voronoi => "voronoi",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Random => "Random",
			Self::Grid => "Grid",
			Self::Voronoi => "Voronoi",
		}
	}
}

impl FromStr for MapType {
	type Err = UnknownOption;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|m| m.as_str() == s)
			.ok_or_else(|| UnknownOption(s.to_owned()))
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewGameRequest {
	pub difficulty: Difficulty,
	pub map_type: MapType,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeEntry {
	pub id: NodeId,
}

/// Adjacency constraint: the two regions must not share a color.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EdgeEntry {
	pub source: NodeId,
	pub target: NodeId,
}

/// Position in the backend's layout units; not yet fitted to the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct RawPosition {
	pub x: f64,
	pub y: f64,
}

/// Full puzzle description returned when a game starts.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PuzzleSnapshot {
	pub nodes: Vec<NodeEntry>,
	pub edges: Vec<EdgeEntry>,
	pub positions: BTreeMap<NodeId, RawPosition>,
	pub available_colors: Vec<String>,
	#[serde(default)]
	pub node_colors: NodeColors,
	#[serde(default)]
	pub message: String,
}

impl PuzzleSnapshot {
	pub fn contains(&self, id: &NodeId) -> bool {
		self.nodes.iter().any(|n| &n.id == id)
	}

	pub fn color(&self, index: ColorIndex) -> Option<&str> {
		self.available_colors.get(index).map(String::as_str)
	}
}

/// One node/color pair sent to `/color_node`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRequest {
	pub node_id: NodeId,
	pub color_index: ColorIndex,
}

/// Backend verdict on a single move.
///
/// `node_colors` and `game_complete` are only sent for accepted moves.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MoveResult {
	pub valid: bool,
	#[serde(default)]
	pub message: String,
	pub node_colors: Option<NodeColors>,
	pub game_complete: Option<bool>,
	pub moves: Option<u32>,
	pub score: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct HintResponse {
	#[serde(default)]
	pub message: String,
	pub hint_node: Option<NodeId>,
	pub hint_color: Option<ColorIndex>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
	Slow,
	#[default]
	Normal,
	Fast,
}

impl AnimationSpeed {
	pub const ALL: [AnimationSpeed; 3] = [Self::Slow, Self::Normal, Self::Fast];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Slow => "slow",
			Self::Normal => "normal",
			Self::Fast => "fast",
		}
	}

	/// Multiplier applied to every animation duration.
	pub fn duration_scale(self) -> f64 {
		match self {
			Self::Slow => 1.5,
			Self::Normal => 1.0,
			Self::Fast => 0.5,
		}
	}
}

impl FromStr for AnimationSpeed {
	type Err = UnknownOption;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|a| a.as_str() == s)
			.ok_or_else(|| UnknownOption(s.to_owned()))
	}
}

/// Per-user display preferences, persisted by the backend session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
	pub colorblind_mode: bool,
	pub show_node_labels: bool,
	pub animation_speed: AnimationSpeed,
}

impl Default for GameSettings {
	fn default() -> Self {
		Self {
			colorblind_mode: false,
			show_node_labels: true,
			animation_speed: AnimationSpeed::Normal,
		}
	}
}

/// Summary of a finished game as reported by `/get_game_stats`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
	pub difficulty: String,
	pub moves: u32,
	pub hints: u32,
	pub time: u64,
	pub score: i64,
	pub date: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
	pub error: String,
}
