//! `reqwest`-backed mediator client.

use std::time::Duration;

use island_core::{Direction, GameState, PlayerId};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{MediatorError, Operation, Result};
use crate::types::{MoveRequest, MoveVerdict, RegisterRequest, RegisterResponse};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the move-request correlation id on `POST /map`.
const MOVE_ID_HEADER: &str = "uuid";

/// Client for one mediator.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct MediatorClient {
    http: reqwest::Client,
    base_url: String,
}

impl MediatorClient {
    /// Create a client for `base_url` with [`DEFAULT_TIMEOUT`].
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client for `base_url` with a custom per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("island-player/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MediatorError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register as a player reachable at `endpoint` (`ip:port`).
    ///
    /// Returns [`MediatorError::GameFull`] when the mediator answers `423 Locked`.
    pub async fn register(&self, name: &str, endpoint: &str) -> Result<PlayerId> {
        let op = Operation::Register;
        let url = self.url("/player");
        let request = self
            .http
            .post(&url)
            .json(&RegisterRequest { name, endpoint });
        let response = send(op, &url, request).await?;

        match response.status() {
            status if status.is_success() => {
                let body: RegisterResponse = decode(op, &url, response).await?;
                Ok(body.id)
            }
            StatusCode::LOCKED => Err(MediatorError::GameFull),
            status => Err(unexpected(op, url, status)),
        }
    }

    /// Fetch the current game state.
    pub async fn fetch_state(&self) -> Result<GameState> {
        let op = Operation::FetchState;
        let url = self.url("/map");
        let response = send(op, &url, self.http.get(&url)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(unexpected(op, url, status));
        }
        decode(op, &url, response).await
    }

    /// Answer the move request `request_id` with `direction`.
    ///
    /// A `400` answer means the mediator refused the move and is not an error.
    pub async fn submit_move(&self, request_id: &str, direction: Direction) -> Result<MoveVerdict> {
        let op = Operation::SubmitMove;
        let url = self.url("/map");
        let request = self
            .http
            .post(&url)
            .header(MOVE_ID_HEADER, request_id)
            .json(&MoveRequest { direction });
        let response = send(op, &url, request).await?;

        match response.status() {
            status if status.is_success() => Ok(MoveVerdict::Accepted),
            StatusCode::BAD_REQUEST => Ok(MoveVerdict::Refused),
            status => Err(unexpected(op, url, status)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn send(op: Operation, url: &str, request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|source| MediatorError::Transport {
        operation: op,
        url: url.to_string(),
        source,
    })?;
    debug!(operation = %op, url, status = response.status().as_u16(), "mediator responded");
    Ok(response)
}

async fn decode<T: DeserializeOwned>(op: Operation, url: &str, response: Response) -> Result<T> {
    let body = response.bytes().await.map_err(|source| MediatorError::Transport {
        operation: op,
        url: url.to_string(),
        source,
    })?;
    serde_json::from_slice(&body).map_err(|source| MediatorError::Decode {
        operation: op,
        url: url.to_string(),
        source,
    })
}

fn unexpected(op: Operation, url: String, status: StatusCode) -> MediatorError {
    MediatorError::UnexpectedStatus {
        operation: op,
        url,
        status: status.as_u16(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
