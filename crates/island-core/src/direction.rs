//! Move intents sent to the mediator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cardinal move, or no move at all.
///
/// Serialized as the single letter the mediator expects (`"N"`, `"E"`, `"S"`,
/// `"W"`, and `"O"` for [`Direction::None`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Up one row.
    #[serde(rename = "N")]
    North,
    /// Right one column.
    #[serde(rename = "E")]
    East,
    /// Down one row.
    #[serde(rename = "S")]
    South,
    /// Left one column.
    #[serde(rename = "W")]
    West,
    /// Stay in place. Also the fallback when no decision could be made.
    #[default]
    #[serde(rename = "O")]
    None,
}

impl Direction {
    /// All five directions.
    pub const ALL: [Self; 5] = [Self::North, Self::East, Self::South, Self::West, Self::None];

    /// The wire letter for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::East => "E",
            Self::South => "S",
            Self::West => "W",
            Self::None => "O",
        }
    }

    /// Column and row offset of this move (`y` grows southwards).
    pub fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::None => (0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
