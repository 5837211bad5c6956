//! # island-core
//!
//! Shared vocabulary for the island player crates:
//!
//! - **Board**: [`Cell`] classification, [`GameMap`] grid with bounds-checked lookup
//! - **Snapshot**: [`GameState`] as served by the mediator (`map` + `gamers`)
//! - **Moves**: the closed [`Direction`] enumeration and its wire letters
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` stack

#![deny(unsafe_code)]

pub mod cell;
pub mod direction;
pub mod logging;
pub mod state;

pub use cell::{Cell, CellKind};
pub use direction::Direction;
pub use state::{GameMap, GameState, MapError, Player, PlayerId};
