//! Who this player is on the network and in the game.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::OnceLock;

use island_core::PlayerId;
use tracing::{debug, warn};

use crate::errors::AgentError;
use crate::names;
use crate::orchestrator::AgentConfig;

/// Port used when no free port could be allocated.
pub const DEFAULT_PORT: u16 = 9000;

/// Network identity, team name and (once registered) player id.
///
/// Everything but the player id is fixed at construction. The player id is set
/// at most once, by the orchestrator, and read by request handlers.
#[derive(Debug)]
pub struct PlayerIdentity {
    local_ip: IpAddr,
    port: u16,
    team_name: String,
    player_id: OnceLock<PlayerId>,
}

impl PlayerIdentity {
    /// Create an unregistered identity.
    pub fn new(local_ip: IpAddr, port: u16, team_name: impl Into<String>) -> Self {
        Self {
            local_ip,
            port,
            team_name: team_name.into(),
            player_id: OnceLock::new(),
        }
    }

    /// Resolve every field from configuration and the host.
    pub fn resolve(config: &AgentConfig) -> Result<Self, AgentError> {
        let local_ip = match config.advertise_ip {
            Some(ip) => ip,
            None => detect_local_ip()?,
        };
        let port = resolve_port(config.port, free_port);
        let team_name = resolve_team_name(config.team_name.as_deref());
        Ok(Self::new(local_ip, port, team_name))
    }

    /// Address advertised to the mediator.
    pub fn local_ip(&self) -> IpAddr {
        self.local_ip
    }

    /// Port the player server listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Team name sent at registration.
    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    /// `ip:port` the mediator calls back on.
    pub fn endpoint(&self) -> String {
        SocketAddr::new(self.local_ip, self.port).to_string()
    }

    /// Player id assigned by the mediator, if registered.
    pub fn player_id(&self) -> Option<PlayerId> {
        self.player_id.get().copied()
    }

    /// Record the id assigned at registration.
    ///
    /// Returns `false` (and keeps the first id) if one was already assigned.
    pub fn assign_player_id(&self, id: PlayerId) -> bool {
        self.player_id.set(id).is_ok()
    }
}

/// First non-loopback IPv4 address of the host.
pub fn detect_local_ip() -> Result<IpAddr, AgentError> {
    let interfaces = if_addrs::get_if_addrs().map_err(AgentError::Interfaces)?;
    let ip = pick_local_ip(interfaces.iter().map(if_addrs::Interface::ip))
        .ok_or(AgentError::NoLocalAddress)?;
    debug!(%ip, "found local ip");
    Ok(ip)
}

/// First address that is IPv4 and not loopback.
pub fn pick_local_ip(addrs: impl IntoIterator<Item = IpAddr>) -> Option<IpAddr> {
    addrs
        .into_iter()
        .find(|ip| ip.is_ipv4() && !ip.is_loopback())
}

/// Configured port if non-zero, else one from `allocate`, else [`DEFAULT_PORT`].
pub fn resolve_port(configured: u16, allocate: impl FnOnce() -> io::Result<u16>) -> u16 {
    if configured > 0 {
        return configured;
    }
    match allocate() {
        Ok(port) => port,
        Err(error) => {
            warn!(%error, fallback = DEFAULT_PORT, "could not allocate a free port");
            DEFAULT_PORT
        }
    }
}

/// Ask the OS for a free ephemeral port.
pub fn free_port() -> io::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

/// Configured name if not blank, else a generated one.
pub fn resolve_team_name(configured: Option<&str>) -> String {
    match configured.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => names::generate(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
