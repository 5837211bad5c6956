//! Wire payloads of the mediator protocol.

use island_core::{Direction, PlayerId};
use serde::{Deserialize, Serialize};

/// `POST /player` body.
#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub endpoint: &'a str,
}

/// `POST /player` response.
#[derive(Debug, Deserialize)]
pub(crate) struct RegisterResponse {
    pub id: PlayerId,
}

/// `POST /map` body.
#[derive(Debug, Serialize)]
pub(crate) struct MoveRequest {
    #[serde(rename = "move")]
    pub direction: Direction,
}

/// How the mediator received a submitted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveVerdict {
    /// The move was taken into account.
    Accepted,
    /// The mediator refused the move (`400`).
    Refused,
}

impl MoveVerdict {
    /// Whether the move was accepted.
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}
