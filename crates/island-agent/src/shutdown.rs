//! Bounded drain of the player web server.

use std::io;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::errors::AgentError;

/// Default time in-flight requests get to finish.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Stop the server behind `handle` and wait for it.
///
/// 1. Cancel `drain` (the server's graceful-shutdown signal)
/// 2. Wait up to `timeout` for the server task
/// 3. Abort it if it is still running
///
/// A server that already finished cleanly counts as a successful drain, so does
/// one that had to be aborted.
pub async fn drain_server(
    handle: JoinHandle<io::Result<()>>,
    drain: &CancellationToken,
    timeout: Duration,
) -> Result<(), AgentError> {
    drain.cancel();
    info!(timeout_ms = timeout.as_millis(), "draining player web server");

    let abort = handle.abort_handle();
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(Ok(()))) => {
            info!("player web server stopped");
            Ok(())
        }
        Ok(Ok(Err(e))) => Err(AgentError::Server(e)),
        Ok(Err(e)) if e.is_cancelled() => Ok(()),
        Ok(Err(e)) => Err(AgentError::ServerTask(e.to_string())),
        Err(_) => {
            warn!("drain timed out after {timeout:?}, aborting player web server");
            abort.abort();
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
