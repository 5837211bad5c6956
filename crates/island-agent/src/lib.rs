//! # island-agent
//!
//! The player process proper:
//!
//! - [`Agent`]: resolves the player's identity, starts the inbound HTTP server,
//!   registers with the mediator after a grace delay and shuts down gracefully
//! - [`router`]: the endpoints the mediator (and humans) call on the player
//! - [`MoveStrategy`]: the pluggable decision port consulted on every move request

#![deny(unsafe_code)]

pub mod errors;
pub mod identity;
pub mod names;
pub mod orchestrator;
pub mod router;
pub mod shutdown;
pub mod strategy;
pub mod ui;

pub use errors::AgentError;
pub use identity::{DEFAULT_PORT, PlayerIdentity};
pub use orchestrator::{Agent, AgentConfig, AgentPhase};
pub use router::{AgentContext, MoveOutcome, build_router};
pub use strategy::{MoveStrategy, StandStill, StrategyContext, StrategyError};
