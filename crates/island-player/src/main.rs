//! # island-player
//!
//! Player binary: loads settings, starts the agent with the default strategy and
//! stops it on Ctrl-C, SIGTERM or game end.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use island_agent::{Agent, AgentConfig, StandStill};
use island_core::logging::{DEFAULT_LEVEL, init_subscriber, level_for};
use island_mediator::MediatorClient;
use island_settings::{PlayerSettings, load_settings, load_settings_from_path};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Game player.
#[derive(Parser, Debug)]
#[command(name = "island-player", about = "Plays a game hosted by a remote mediator")]
struct Cli {
    /// Port to listen on (0 picks a free one).
    #[arg(short, long)]
    port: Option<u16>,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Team name (generated when omitted).
    #[arg(short, long)]
    team_name: Option<String>,

    /// Base URL of the mediator.
    #[arg(short = 'm', long)]
    base_mediator_url: Option<String>,

    /// Keep running after the game ends.
    #[arg(long)]
    manual_exit: bool,

    /// Address advertised to the mediator instead of the detected one.
    #[arg(long)]
    advertise_ip: Option<String>,

    /// Interface to bind.
    #[arg(long)]
    bind_host: Option<String>,

    /// JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command-line values win over file and environment.
    fn apply(&self, settings: &mut PlayerSettings) {
        if let Some(port) = self.port {
            settings.port = port;
        }
        if self.verbose {
            settings.verbose = true;
        }
        if let Some(name) = &self.team_name {
            settings.team_name = Some(name.clone());
        }
        if let Some(url) = &self.base_mediator_url {
            settings.mediator_url.clone_from(url);
        }
        if self.manual_exit {
            settings.manual_exit = true;
        }
        if let Some(ip) = &self.advertise_ip {
            settings.advertise_ip = Some(ip.clone());
        }
        if let Some(host) = &self.bind_host {
            settings.bind_host.clone_from(host);
        }
    }

    fn settings(&self) -> Result<PlayerSettings> {
        let mut settings = match &self.config {
            Some(path) => load_settings_from_path(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => load_settings(),
        };
        self.apply(&mut settings);
        Ok(settings)
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    init_subscriber(level_for(settings.verbose));
    info!(
        mediator = %settings.mediator_url,
        manual_exit = settings.manual_exit,
        "starting player"
    );

    let mediator = MediatorClient::with_timeout(
        settings.mediator_url.as_str(),
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("Failed to build mediator client")?;
    let config = AgentConfig::from_settings(&settings)?;
    let agent = Agent::new(config, mediator, Arc::new(StandStill));

    let shutdown = CancellationToken::new();
    let _signals = tokio::spawn(shutdown_signal(shutdown.clone()));

    agent.run(shutdown).await?;
    Ok(())
}

/// Cancel `token` on Ctrl-C or SIGTERM.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                let _ = sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("interrupted"),
        () = terminate => info!("terminated"),
        () = token.cancelled() => return,
    }
    token.cancel();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => {
            info!("bye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // no-op when the subscriber is already installed
            init_subscriber(DEFAULT_LEVEL);
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
