//! Fatal agent errors.

use island_mediator::MediatorError;
use thiserror::Error;

/// Errors that end [`crate::Agent::run`].
#[derive(Debug, Error)]
pub enum AgentError {
    /// Network interfaces could not be listed.
    #[error("failed to list network interfaces: {0}")]
    Interfaces(#[source] std::io::Error),

    /// No interface carries a non-loopback IPv4 address.
    #[error("no usable non-loopback IPv4 address found")]
    NoLocalAddress,

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The player web server could not bind its address.
    #[error("failed to bind player web server on {addr}: {source}")]
    Bind {
        /// Address the server tried to bind.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The player web server stopped with an error.
    #[error("player web server stopped: {0}")]
    Server(#[source] std::io::Error),

    /// The player web server task panicked or was aborted.
    #[error("player web server task failed: {0}")]
    ServerTask(String),

    /// Registration failed for a reason other than a full game.
    #[error("failed to register to the mediator: {0}")]
    Registration(#[source] MediatorError),

    /// [`crate::Agent::run`] was called on an agent that already ran.
    #[error("agent already started")]
    AlreadyStarted,
}
