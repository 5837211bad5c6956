//! Board cell classification.
//!
//! The mediator encodes every square of the map as a non-negative integer:
//! `0` empty, `1` banana, `2` wall, anything above the wall sentinel is the id of
//! the player standing there.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::PlayerId;

const EMPTY: u32 = 0;
const BANANA: u32 = 1;
const WALL: u32 = 2;

/// One square of the game map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(u32);

/// The four mutually exclusive categories a [`Cell`] falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Nothing on this square.
    Empty,
    /// A collectible banana.
    Banana,
    /// Impassable.
    Wall,
    /// Occupied by the player with this id.
    Player(PlayerId),
}

impl Cell {
    /// An empty square.
    pub const EMPTY: Self = Self(EMPTY);
    /// A banana square.
    pub const BANANA: Self = Self(BANANA);
    /// A wall square.
    pub const WALL: Self = Self(WALL);

    /// Wrap a raw wire value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw wire value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Classify this cell.
    pub fn kind(self) -> CellKind {
        match self.0 {
            EMPTY => CellKind::Empty,
            BANANA => CellKind::Banana,
            WALL => CellKind::Wall,
            id => CellKind::Player(PlayerId::new(id)),
        }
    }

    /// Whether nothing stands on this square.
    pub fn is_empty(self) -> bool {
        self.0 == EMPTY
    }

    /// Whether a banana lies on this square.
    pub fn is_banana(self) -> bool {
        self.0 == BANANA
    }

    /// Whether this square is a wall.
    pub fn is_wall(self) -> bool {
        self.0 == WALL
    }

    /// Whether a player occupies this square.
    pub fn is_player(self) -> bool {
        self.0 > WALL
    }

    /// The occupying player, if any.
    pub fn occupant(self) -> Option<PlayerId> {
        match self.kind() {
            CellKind::Player(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
