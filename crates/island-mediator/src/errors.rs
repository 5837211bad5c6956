//! Mediator client errors.

use std::fmt;

use thiserror::Error;

/// The mediator call that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// `POST /player`
    Register,
    /// `GET /map`
    FetchState,
    /// `POST /map`
    SubmitMove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Register => "register",
            Self::FetchState => "fetch state",
            Self::SubmitMove => "submit move",
        })
    }
}

/// Errors returned by [`crate::MediatorClient`].
#[derive(Debug, Error)]
pub enum MediatorError {
    /// The game already has all its players (`423 Locked` on registration).
    #[error("game is full")]
    GameFull,

    /// The mediator answered with a status the protocol does not expect.
    #[error("{operation}: mediator at {url} answered with unexpected status {status}")]
    UnexpectedStatus {
        /// Failed call.
        operation: Operation,
        /// Target URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Connection, DNS, timeout or body transfer failure.
    #[error("{operation}: could not reach mediator at {url}: {source}")]
    Transport {
        /// Failed call.
        operation: Operation,
        /// Target URL.
        url: String,
        /// Underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not the JSON the protocol describes.
    #[error("{operation}: malformed response from {url}: {source}")]
    Decode {
        /// Failed call.
        operation: Operation,
        /// Target URL.
        url: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client could not be built.
    #[error("invalid mediator client configuration: {0}")]
    InvalidConfig(String),
}

impl MediatorError {
    /// Whether this is the expected "game is full" refusal.
    pub fn is_game_full(&self) -> bool {
        matches!(self, Self::GameFull)
    }

    /// The mediator could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// The mediator was reached and said no.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::GameFull | Self::UnexpectedStatus { .. })
    }

    /// The mediator answered with an unreadable body.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// HTTP status behind a rejection, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::GameFull => Some(423),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::GameFull => "game_full",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::Transport { .. } => "transport",
            Self::Decode { .. } => "decode",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// Result type for mediator calls.
pub type Result<T> = std::result::Result<T, MediatorError>;
