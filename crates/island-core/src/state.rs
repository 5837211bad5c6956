//! Game state snapshot as served by the mediator's `GET /map`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::cell::Cell;

/// Identifier the mediator assigns to a registered player.
///
/// The same number marks the player's square on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Wrap a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map lookup failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// Coordinates outside the grid.
    #[error("coordinates ({x}, {y}) are out of range")]
    OutOfRange {
        /// Column.
        x: i64,
        /// Row.
        y: i64,
    },
}

/// Two-dimensional grid of cells, `rows[y][x]`.
///
/// Rows are not required to have equal length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameMap(Vec<Vec<Cell>>);

impl GameMap {
    /// Build a map from its rows.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self(rows)
    }

    /// Cell at column `x`, row `y`.
    pub fn cell(&self, x: i64, y: i64) -> Result<Cell, MapError> {
        let out_of_range = MapError::OutOfRange { x, y };
        let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
            return Err(out_of_range);
        };
        self.0
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .ok_or(out_of_range)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.0.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.0
    }

    /// Whether the map has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Vec::is_empty)
    }
}

/// One entry of the mediator's `gamers` list.
///
/// Only the commonly used fields are typed; anything else the mediator sends is
/// kept in `extra` so the snapshot can be re-served unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Mediator-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlayerId>,
    /// Team name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    /// Remaining mediator fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Snapshot of the whole game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    #[serde(default, deserialize_with = "null_as_default")]
    pub map: GameMap,
    /// Registered players, in mediator order.
    #[serde(rename = "gamers", default, deserialize_with = "null_as_default")]
    pub players: Vec<Player>,
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
