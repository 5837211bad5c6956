//! Agent lifecycle: identity, web server, delayed registration, shutdown.

use std::fmt;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use island_mediator::MediatorClient;
use island_settings::PlayerSettings;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::errors::AgentError;
use crate::identity::PlayerIdentity;
use crate::router::{AgentContext, build_router};
use crate::shutdown::{self, DEFAULT_DRAIN_TIMEOUT};
use crate::strategy::MoveStrategy;

/// Default wait between server start and registration.
pub const DEFAULT_REGISTRATION_DELAY: Duration = Duration::from_secs(2);

/// Agent configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    /// Host the web server binds.
    pub bind_host: String,
    /// Listen port; `0` picks a free one.
    pub port: u16,
    /// Team name; generated when unset or blank.
    pub team_name: Option<String>,
    /// Address advertised to the mediator instead of the detected one.
    pub advertise_ip: Option<IpAddr>,
    /// Keep running after the game ends.
    pub manual_exit: bool,
    /// Wait between server start and registration.
    pub registration_delay: Duration,
    /// Time in-flight requests get on shutdown.
    pub drain_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".into(),
            port: 0,
            team_name: None,
            advertise_ip: None,
            manual_exit: false,
            registration_delay: DEFAULT_REGISTRATION_DELAY,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}

impl AgentConfig {
    /// Build from loaded settings.
    pub fn from_settings(settings: &PlayerSettings) -> Result<Self, AgentError> {
        let advertise_ip = match settings.advertise_ip.as_deref().map(str::trim) {
            Some(ip) if !ip.is_empty() => Some(ip.parse::<IpAddr>().map_err(|e| {
                AgentError::InvalidConfig(format!("advertise ip {ip:?}: {e}"))
            })?),
            _ => None,
        };
        Ok(Self {
            bind_host: settings.bind_host.clone(),
            port: settings.port,
            team_name: settings.team_name.clone(),
            advertise_ip,
            manual_exit: settings.manual_exit,
            registration_delay: Duration::from_millis(settings.registration_delay_ms),
            drain_timeout: Duration::from_secs(settings.drain_timeout_secs),
        })
    }
}

/// Where the agent is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentPhase {
    /// Resolving identity.
    Initializing,
    /// Binding the web server.
    ServerStarting,
    /// Serving, waiting for the registration delay.
    AwaitingRegistrationWindow,
    /// The mediator assigned a player id.
    Registered,
    /// The game was full; serving without a player id.
    RegistrationFailedNonFatal,
    /// Serving callbacks.
    Running,
    /// Draining the web server.
    ShuttingDown,
    /// Done.
    Stopped,
}

impl fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Initializing => "initializing",
            Self::ServerStarting => "server_starting",
            Self::AwaitingRegistrationWindow => "awaiting_registration_window",
            Self::Registered => "registered",
            Self::RegistrationFailedNonFatal => "registration_failed_non_fatal",
            Self::Running => "running",
            Self::ShuttingDown => "shutting_down",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// A player taking part in one game.
pub struct Agent {
    config: AgentConfig,
    mediator: MediatorClient,
    strategy: Arc<dyn MoveStrategy>,
    phase: watch::Sender<AgentPhase>,
    identity: OnceLock<Arc<PlayerIdentity>>,
    started: AtomicBool,
}

impl Agent {
    /// Create an agent that plays with `strategy`.
    pub fn new(config: AgentConfig, mediator: MediatorClient, strategy: Arc<dyn MoveStrategy>) -> Self {
        Self {
            config,
            mediator,
            strategy,
            phase: watch::Sender::new(AgentPhase::Initializing),
            identity: OnceLock::new(),
            started: AtomicBool::new(false),
        }
    }

    /// Follow phase changes.
    pub fn subscribe_phase(&self) -> watch::Receiver<AgentPhase> {
        self.phase.subscribe()
    }

    /// Current phase.
    pub fn phase(&self) -> AgentPhase {
        *self.phase.borrow()
    }

    /// Identity, once resolved by [`Agent::run`].
    pub fn identity(&self) -> Option<Arc<PlayerIdentity>> {
        self.identity.get().cloned()
    }

    /// Run until `shutdown` is cancelled, the game ends or a fatal error occurs.
    ///
    /// The game-end signal cancels `shutdown` itself unless manual exit is set.
    /// The web server is drained before returning, whatever the outcome.
    ///
    /// An agent plays a single game: any call after the first returns
    /// [`AgentError::AlreadyStarted`] without touching the running one.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), AgentError> {
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(AgentError::AlreadyStarted);
        }
        self.set_phase(AgentPhase::Initializing);
        let identity = Arc::new(PlayerIdentity::resolve(&self.config)?);
        self.identity
            .set(Arc::clone(&identity))
            .map_err(|_| AgentError::AlreadyStarted)?;
        info!(
            ip = %identity.local_ip(),
            port = identity.port(),
            team_name = identity.team_name(),
            strategy = self.strategy.name(),
            "player identity resolved"
        );

        self.set_phase(AgentPhase::ServerStarting);
        let host = self.config.bind_host.as_str();
        let listener = TcpListener::bind((host, identity.port()))
            .await
            .map_err(|source| AgentError::Bind {
                addr: format!("{host}:{}", identity.port()),
                source,
            })?;
        info!(host, port = identity.port(), "player web server listening");

        let ctx = Arc::new(AgentContext::new(
            Arc::clone(&identity),
            self.mediator.clone(),
            Arc::clone(&self.strategy),
            self.config.manual_exit,
            shutdown.clone(),
        ));
        let drain = CancellationToken::new();
        let mut server = tokio::spawn({
            let drain = drain.clone();
            async move {
                axum::serve(listener, build_router(ctx))
                    .with_graceful_shutdown(drain.cancelled_owned())
                    .await
            }
        });

        self.set_phase(AgentPhase::AwaitingRegistrationWindow);
        let registration = tokio::time::sleep(self.config.registration_delay);
        tokio::pin!(registration);
        let mut pending = true;
        let mut server_done = false;

        let result = loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    info!("shutdown requested");
                    break Ok(());
                }
                joined = &mut server => {
                    server_done = true;
                    break match joined {
                        Ok(Ok(())) => {
                            info!("player web server closed");
                            Ok(())
                        }
                        Ok(Err(e)) => Err(AgentError::Server(e)),
                        Err(e) => Err(AgentError::ServerTask(e.to_string())),
                    };
                }
                () = &mut registration, if pending => {
                    pending = false;
                    let endpoint = identity.endpoint();
                    info!(team_name = identity.team_name(), %endpoint, "registering to the mediator");
                    match self.mediator.register(identity.team_name(), &endpoint).await {
                        Ok(id) => {
                            let _ = identity.assign_player_id(id);
                            info!(player_id = %id, "registered to the mediator");
                            self.set_phase(AgentPhase::Registered);
                        }
                        Err(e) if e.is_game_full() => {
                            warn!(error = %e, "game is full, serving without a player id");
                            self.set_phase(AgentPhase::RegistrationFailedNonFatal);
                        }
                        Err(e) => break Err(AgentError::Registration(e)),
                    }
                    self.set_phase(AgentPhase::Running);
                }
            }
        };

        self.set_phase(AgentPhase::ShuttingDown);
        let result = if server_done {
            result
        } else {
            let drained = shutdown::drain_server(server, &drain, self.config.drain_timeout).await;
            result.and(drained)
        };
        self.set_phase(AgentPhase::Stopped);
        result
    }

    fn set_phase(&self, phase: AgentPhase) {
        let _ = self.phase.send_replace(phase);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
