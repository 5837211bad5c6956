//! Settings types.

use serde::{Deserialize, Serialize};

/// Mediator contact point used when none is configured.
pub const DEFAULT_MEDIATOR_URL: &str = "http://localhost:8080";

/// Everything the player can be configured with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerSettings {
    /// Port the player server binds to. `0` picks a free port.
    pub port: u16,
    /// Debug-level logging.
    pub verbose: bool,
    /// Team name sent at registration. Generated when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    /// Base URL of the game mediator.
    pub mediator_url: String,
    /// Keep running after the mediator signals the end of the game.
    pub manual_exit: bool,
    /// Address advertised to the mediator instead of the detected one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertise_ip: Option<String>,
    /// Interface the player server binds to.
    pub bind_host: String,
    /// Timeout for each mediator request, in seconds.
    pub request_timeout_secs: u64,
    /// Grace period between server start and registration, in milliseconds.
    pub registration_delay_ms: u64,
    /// Upper bound on draining in-flight requests at shutdown, in seconds.
    pub drain_timeout_secs: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            port: 0,
            verbose: false,
            team_name: None,
            mediator_url: DEFAULT_MEDIATOR_URL.to_string(),
            manual_exit: false,
            advertise_ip: None,
            bind_host: "0.0.0.0".to_string(),
            request_timeout_secs: 10,
            registration_delay_ms: 2_000,
            drain_timeout_secs: 10,
        }
    }
}
