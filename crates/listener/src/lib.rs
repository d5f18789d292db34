//! Webhook event source.
//!
//! Binds an HTTP server and receives GitHub webhook deliveries. `ping`
//! deliveries are acknowledged, `pull_request` deliveries with action
//! `opened` are handed to a [`filing::PullRequestFiler`], and everything else
//! is acknowledged as ignored.
//!
//! | Route | Response |
//! |-------|----------|
//! | `POST {webhook_path}` | `{"status": "filed" \| "not_found" \| "failed" \| "ignored" \| "pong", ...}` |
//! | `GET /healthz` | `ok` |
//!
//! Filing failures are logged and reported in the response body; they never
//! turn into a 5xx, so GitHub does not redeliver. A payload that cannot be
//! parsed is answered with 400.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Transport details and payload deserialization live
//! here. The [`filing`] crate sees only [`filing::OpenedPullRequest`].

use std::net::SocketAddr;

use thiserror::Error;

pub mod events;
mod server;

pub use events::PullRequestEvent;
pub use server::{router, serve, DEFAULT_WEBHOOK_PATH};

/// Failures of the listener itself (not of individual deliveries).
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listening socket could not be bound.
    #[error("Could not bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The server loop failed.
    #[error("Webhook server failed: {0}")]
    Serve(#[source] std::io::Error),
}
