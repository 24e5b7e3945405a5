//! Static puzzle level description.

use std::collections::BTreeSet;

use crate::action::{Action, ActionKind};
use crate::geometry::Position;

/// When a hazard is dangerous.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HazardPattern {
    /// Always active.
    Static,
    /// Active on a repeating schedule derived from the active frames.
    Toggle,
}

impl HazardPattern {
    /// Whether a hazard with this pattern is active at `turn`.
    ///
    /// A toggle hazard cycles with period `max(active_frames) + 2` and is
    /// active when `turn % period` is one of its frames. Without frames it is
    /// never active.
    pub fn is_active(self, active_frames: &[u32], turn: u64) -> bool {
        match self {
            HazardPattern::Static => true,
            HazardPattern::Toggle => match active_frames.iter().max() {
                Some(&highest) => {
                    let cycle = u64::from(highest) + 2;
                    active_frames.contains(&((turn % cycle) as u32))
                }
                None => false,
            },
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HazardType {
    Spike,
    Fire,
}

/// Lethal puzzle cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Hazard {
    pub x: i32,
    pub y: i32,
    pub pattern: HazardPattern,
    #[cfg_attr(feature = "serde", serde(default))]
    pub active_frames: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub hazard_type: HazardType,
}

impl Hazard {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn is_active(&self, turn: u64) -> bool {
        self.pattern.is_active(&self.active_frames, turn)
    }
}

/// Predicates that must all hold for a puzzle to be solved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WinConditions {
    #[cfg_attr(feature = "serde", serde(default))]
    pub reach_goal: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub collect_all_coins: bool,
}

/// Grid puzzle level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LevelData {
    pub grid_width: u32,
    pub grid_height: u32,
    pub start_position: Position,
    pub goals: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coins: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hazards: Vec<Hazard>,
    #[cfg_attr(feature = "serde", serde(default = "default_allowed_methods"))]
    pub allowed_methods: Vec<ActionKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub instructions: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starter_code: String,
    pub win_conditions: WinConditions,
}

#[cfg(feature = "serde")]
fn default_allowed_methods() -> Vec<ActionKind> {
    vec![ActionKind::Move]
}

impl LevelData {
    /// Open level of the given size with no obstacles.
    pub fn open(width: u32, height: u32, start: Position, goal: Position) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            start_position: start,
            goals: vec![goal],
            walls: Vec::new(),
            coins: Vec::new(),
            hazards: Vec::new(),
            allowed_methods: vec![ActionKind::Move, ActionKind::Wait],
            instructions: String::new(),
            starter_code: String::new(),
            win_conditions: WinConditions {
                reach_goal: true,
                collect_all_coins: false,
            },
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.in_bounds(self.grid_width, self.grid_height)
    }

    /// True when the hero may stand on `position`.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.contains(position) && !self.walls.contains(&position)
    }

    /// True when the level's method whitelist allows `action`.
    pub fn permits(&self, action: &Action) -> bool {
        self.allowed_methods.contains(&action.kind())
    }
}

/// Fast lookup tables built once from a [`LevelData`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelIndex {
    pub walls: BTreeSet<Position>,
    pub coins: BTreeSet<Position>,
    pub goals: BTreeSet<Position>,
}

impl LevelIndex {
    pub fn build(level: &LevelData) -> Self {
        Self {
            walls: level.walls.iter().copied().collect(),
            coins: level.coins.iter().copied().collect(),
            goals: level.goals.iter().copied().collect(),
        }
    }
}
