//! The decision port.
//!
//! A [`MoveStrategy`] is handed a fresh [`StrategyContext`] for every move request
//! and answers with a [`Direction`]. Strategies are composed into the agent at
//! construction time; the agent never depends on a concrete one.

use island_core::{Cell, Direction, GameState, PlayerId};
use thiserror::Error;

/// Why a strategy could not decide.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// No reachable target.
    #[error("no path found")]
    NoPath,
    /// The agent has no player id yet, so it cannot find itself on the map.
    #[error("player is not registered")]
    NotRegistered,
    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

/// Everything a strategy gets to see for one move.
#[derive(Clone, Debug)]
pub struct StrategyContext {
    state: GameState,
    player_id: Option<PlayerId>,
}

impl StrategyContext {
    /// Build a context from a snapshot and the agent's own id.
    pub fn new(state: GameState, player_id: Option<PlayerId>) -> Self {
        Self { state, player_id }
    }

    /// The most recent game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The agent's player id, once registered.
    pub fn player_id(&self) -> Option<PlayerId> {
        self.player_id
    }

    /// Whether `cell` is occupied by this agent.
    pub fn is_me(&self, cell: Cell) -> bool {
        match (cell.occupant(), self.player_id) {
            (Some(occupant), Some(me)) => occupant == me,
            _ => false,
        }
    }

    /// Column and row of this agent on the map.
    pub fn my_position(&self) -> Option<(i64, i64)> {
        self.state.map.rows().iter().enumerate().find_map(|(y, row)| {
            let x = row.iter().position(|c| self.is_me(*c))?;
            Some((i64::try_from(x).ok()?, i64::try_from(y).ok()?))
        })
    }
}

/// Chooses where to go.
///
/// `decide` runs on a blocking thread, so it may take its time computing.
pub trait MoveStrategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Pick a direction for the current state.
    fn decide(&self, ctx: &StrategyContext) -> Result<Direction, StrategyError>;
}

/// Never moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandStill;

impl MoveStrategy for StandStill {
    fn name(&self) -> &str {
        "stand-still"
    }

    fn decide(&self, _ctx: &StrategyContext) -> Result<Direction, StrategyError> {
        Ok(Direction::None)
    }
}
