//! Board filer entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: load the TOML file and validate it.
//! 2. **Wire observability**: configure `tracing-subscriber` with a JSON layer
//!    and, when configured, an OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: create the [`github::GitHubClient`] and
//!    inject it into a [`filing::PullRequestFiler`] for the configured board.
//! 4. **Run the selected command**:
//!    - `serve`: run the webhook listener until SIGINT/SIGTERM.
//!    - `file`: read one stored `pull_request` payload and file it once.
//!    - `check-config`: validate the configuration and print the target.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use filing::{BoardTarget, PullRequestFiler};
use github::GitHubClient;
use listener::PullRequestEvent;

mod config;
mod telemetry;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "board-filer", version, about = "Files newly opened pull requests onto a project board")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, short, global = true, env = "BOARD_FILER_CONFIG", default_value = "board-filer.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Receive GitHub webhooks and file every opened pull request.
    Serve {
        /// Overrides `server.bind`.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// File the pull request from one stored `pull_request` webhook payload.
    File {
        /// JSON file containing the webhook payload.
        #[arg(long)]
        payload: PathBuf,
    },
    /// Validate the configuration and print the resolved board target.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    if let Command::CheckConfig = cli.command {
        println!("{}", config.board);
        return Ok(ExitCode::SUCCESS);
    }

    let telemetry = telemetry::init(&config.telemetry)?;
    let result = run(cli.command, &config).await;
    if let Err(e) = &result {
        tracing::error!("board-filer failed: {e:#}");
    }
    telemetry.shutdown();
    result
}

async fn run(command: Command, config: &Config) -> anyhow::Result<ExitCode> {
    let filer = Arc::new(build_filer(config)?);

    match command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or(config.server.bind);
            info!(target_board = %config.board, addr = %addr, "Starting webhook listener");
            let app = listener::router(filer, &config.server.webhook_path);
            listener::serve(addr, app, shutdown_signal())
                .await
                .context("Webhook listener failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::File { payload } => {
            // The filer already logged why the pull request was not filed.
            let filed = file_once(&filer, &payload).await?;
            Ok(if filed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::CheckConfig => Ok(ExitCode::SUCCESS),
    }
}

fn build_filer(config: &Config) -> anyhow::Result<PullRequestFiler> {
    let client = Arc::new(
        GitHubClient::new(config.github_client_config()?).context("Failed to build GitHub client")?,
    );

    Ok(match &config.board {
        BoardTarget::Classic(target) => PullRequestFiler::classic(client, target.clone()),
        BoardTarget::ProjectV2(target) => PullRequestFiler::project_v2(client, target.clone()),
    })
}

/// Files the pull request in a stored payload. Returns `false` when the
/// filer reported a failure; payloads that are not `opened` count as success.
async fn file_once(filer: &PullRequestFiler, payload: &Path) -> anyhow::Result<bool> {
    let text = std::fs::read_to_string(payload)
        .with_context(|| format!("Failed to read payload {}", payload.display()))?;
    let event: PullRequestEvent = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a pull_request payload", payload.display()))?;

    if !event.is_opened() {
        warn!(action = %event.action, "Payload is not a pull_request.opened event; nothing to do");
        return Ok(true);
    }

    let report = filer.handle(&event.opened_pull_request()).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(report.outcome.is_filed())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
