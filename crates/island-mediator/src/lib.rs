//! # island-mediator
//!
//! Client side of the mediator protocol.
//!
//! | Operation | Request | Success | Expected refusal |
//! |---|---|---|---|
//! | [`MediatorClient::register`] | `POST /player` `{name, endpoint}` | `{id}` | `423 Locked` → [`MediatorError::GameFull`] |
//! | [`MediatorClient::fetch_state`] | `GET /map` | `{map, gamers}` | none |
//! | [`MediatorClient::submit_move`] | `POST /map`, header `uuid` | 2xx → [`MoveVerdict::Accepted`] | `400` → [`MoveVerdict::Refused`] |
//!
//! Failures are split into "could not reach the mediator", "the mediator rejected
//! the call" and "the mediator answered something unreadable" (see
//! [`MediatorError`]). Nothing is retried.

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod types;

pub use client::{DEFAULT_TIMEOUT, MediatorClient};
pub use errors::{MediatorError, Operation, Result};
pub use types::MoveVerdict;
