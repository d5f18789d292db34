//! Service configuration.
//!
//! Loaded from a TOML file (default `board-filer.toml`). Every section except
//! `[board]` may be omitted:
//!
//! ```toml
//! [github]
//! api_url = "https://api.github.com"
//! graphql_url = "https://api.github.com/graphql"
//! token_env = "GITHUB_TOKEN"
//!
//! [server]
//! bind = "0.0.0.0:3000"
//! webhook_path = "/api/github/webhooks"
//!
//! [board]
//! kind = "project_v2"
//! owner = "sidtech-solutions"
//! project_number = 2
//! column = "Todo"
//!
//! [telemetry]
//! format = "json"
//! filter = "info"
//! ```
//!
//! The raw file is validated into a [`Config`] once at load time; an invalid
//! file never produces a running service.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use filing::{BoardTarget, ConfigurationError};
use github::{GitHubClientConfig, DEFAULT_API_URL, DEFAULT_GRAPHQL_URL};
use listener::DEFAULT_WEBHOOK_PATH;

const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";
const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_CLASSIC_COLUMN: &str = "ToDo";
const DEFAULT_PROJECT_V2_COLUMN: &str = "Todo";

// ---------------------------------------------------------------------------
// Validated configuration
// ---------------------------------------------------------------------------

/// Validated service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub API endpoints and credentials.
    pub github: GitHubSettings,
    /// Webhook listener settings.
    pub server: ServerSettings,
    /// Board that opened pull requests are filed onto.
    pub board: BoardTarget,
    /// Log output and span export.
    pub telemetry: TelemetrySettings,
}

/// `[github]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubSettings {
    /// REST API base URL.
    pub api_url: String,
    /// GraphQL endpoint URL.
    pub graphql_url: String,
    /// Name of the environment variable holding the API token.
    pub token_env: String,
    /// Overrides the default `User-Agent` header.
    pub user_agent: Option<String>,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the webhook listener binds to.
    pub bind: SocketAddr,
    /// Path GitHub delivers webhooks to.
    pub webhook_path: String,
}

/// Log line encoding on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-field lines.
    Pretty,
}

/// `[telemetry]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetrySettings {
    /// Log line encoding.
    pub format: LogFormat,
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set.
    pub filter: String,
    /// OTLP collector endpoint; spans are only exported when set.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Reads and validates the configuration file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }

    /// Parses and validates configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        let raw: RawConfig =
            toml::from_str(text).map_err(|e| ConfigurationError::new(e.to_string()))?;
        raw.validate()
    }

    /// Client settings with the token read from the configured environment variable.
    pub fn github_client_config(&self) -> anyhow::Result<GitHubClientConfig> {
        let token = std::env::var(&self.github.token_env).with_context(|| {
            format!(
                "GitHub token not found in environment variable {}",
                self.github.token_env
            )
        })?;
        if token.trim().is_empty() {
            anyhow::bail!("Environment variable {} is empty", self.github.token_env);
        }

        let mut client = GitHubClientConfig::new(token.trim());
        client.api_url = self.github.api_url.clone();
        client.graphql_url = self.github.graphql_url.clone();
        if let Some(agent) = &self.github.user_agent {
            client.user_agent = agent.clone();
        }
        Ok(client)
    }
}

// ---------------------------------------------------------------------------
// Raw file shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    github: RawGitHub,
    #[serde(default)]
    server: RawServer,
    board: RawBoard,
    #[serde(default)]
    telemetry: RawTelemetry,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGitHub {
    api_url: Option<String>,
    graphql_url: Option<String>,
    token_env: Option<String>,
    user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    bind: Option<String>,
    webhook_path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum RawBoard {
    Classic {
        project_id: u64,
        column: Option<String>,
    },
    ProjectV2 {
        owner: String,
        project_number: u64,
        column: Option<String>,
        status_field: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTelemetry {
    #[serde(default)]
    format: LogFormat,
    filter: Option<String>,
    otlp_endpoint: Option<String>,
}

fn non_empty(value: Option<String>, key: &str, default: &str) -> Result<String, ConfigurationError> {
    let value = value.unwrap_or_else(|| default.to_string());
    if value.trim().is_empty() {
        return Err(ConfigurationError::new(format!("{key} must not be empty")));
    }
    Ok(value.trim().to_string())
}

impl RawConfig {
    fn validate(self) -> Result<Config, ConfigurationError> {
        let github = GitHubSettings {
            api_url: non_empty(self.github.api_url, "github.api_url", DEFAULT_API_URL)?,
            graphql_url: non_empty(
                self.github.graphql_url,
                "github.graphql_url",
                DEFAULT_GRAPHQL_URL,
            )?,
            token_env: non_empty(self.github.token_env, "github.token_env", DEFAULT_TOKEN_ENV)?,
            user_agent: self.github.user_agent.filter(|a| !a.trim().is_empty()),
        };

        let bind = non_empty(self.server.bind, "server.bind", DEFAULT_BIND)?;
        let bind: SocketAddr = bind
            .parse()
            .map_err(|_| ConfigurationError::new(format!("server.bind \"{bind}\" is not a socket address")))?;
        let webhook_path = non_empty(
            self.server.webhook_path,
            "server.webhook_path",
            DEFAULT_WEBHOOK_PATH,
        )?;
        if !webhook_path.starts_with('/') || webhook_path == "/healthz" {
            return Err(ConfigurationError::new(format!(
                "server.webhook_path \"{webhook_path}\" must start with '/' and differ from /healthz"
            )));
        }

        let board = match self.board {
            RawBoard::Classic { project_id, column } => BoardTarget::classic(
                project_id,
                column.as_deref().unwrap_or(DEFAULT_CLASSIC_COLUMN),
            )?,
            RawBoard::ProjectV2 {
                owner,
                project_number,
                column,
                status_field,
            } => BoardTarget::project_v2(
                &owner,
                project_number,
                column.as_deref().unwrap_or(DEFAULT_PROJECT_V2_COLUMN),
                status_field.as_deref(),
            )?,
        };

        let telemetry = TelemetrySettings {
            format: self.telemetry.format,
            filter: non_empty(self.telemetry.filter, "telemetry.filter", "info")?,
            otlp_endpoint: self.telemetry.otlp_endpoint.filter(|e| !e.trim().is_empty()),
        };

        Ok(Config {
            github,
            server: ServerSettings { bind, webhook_path },
            board,
            telemetry,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
