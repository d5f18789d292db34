//! HTTP webhook receiver.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use filing::{FilingOutcome, PullRequestFiler};

use crate::events::{PullRequestEvent, PING_EVENT, PULL_REQUEST_EVENT};
use crate::ListenerError;

/// Path GitHub Apps deliver webhooks to by default.
pub const DEFAULT_WEBHOOK_PATH: &str = "/api/github/webhooks";

/// Builds the router: the webhook endpoint at `webhook_path` and `GET /healthz`.
pub fn router(filer: Arc<PullRequestFiler>, webhook_path: &str) -> Router {
    Router::new()
        .route(webhook_path, post(handle_webhook))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(filer)
}

/// Binds `addr` and serves `router` until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, router: Router, shutdown: F) -> Result<(), ListenerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;
    let local = listener.local_addr().map_err(ListenerError::Serve)?;
    info!(addr = %local, "Listening for GitHub webhooks");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ListenerError::Serve)?;

    info!("Webhook listener stopped");
    Ok(())
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

fn ignored(reason: &str) -> Json<Value> {
    Json(json!({ "status": "ignored", "reason": reason }))
}

/// Handles one webhook delivery.
async fn handle_webhook(
    State(filer): State<Arc<PullRequestFiler>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, StatusCode> {
    let event_type = header(&headers, "X-GitHub-Event");
    let delivery_id = header(&headers, "X-GitHub-Delivery");

    info!(
        event_type = %event_type,
        delivery_id = %delivery_id,
        "Received GitHub webhook"
    );

    if event_type == PING_EVENT {
        return Ok(Json(json!({ "status": "pong" })));
    }

    if event_type != PULL_REQUEST_EVENT {
        debug!(event_type = %event_type, "Ignoring non-pull_request event");
        return Ok(ignored("not_pull_request_event"));
    }

    let event: PullRequestEvent = serde_json::from_slice(&body).map_err(|e| {
        warn!(delivery_id = %delivery_id, error = %e, "Failed to parse pull_request payload");
        StatusCode::BAD_REQUEST
    })?;

    if !event.is_opened() {
        debug!(action = %event.action, "Ignoring pull_request action");
        return Ok(ignored("not_opened"));
    }

    let pull_request = event.opened_pull_request();
    info!(
        delivery_id = %delivery_id,
        pr_number = %pull_request.number,
        title = event.pull_request.title.as_deref().unwrap_or(""),
        "PR number is {}",
        pull_request.number
    );

    let report = filer.handle(&pull_request).await;
    let status = match &report.outcome {
        FilingOutcome::Filed(_) => "filed",
        FilingOutcome::NotFound(_) => "not_found",
        FilingOutcome::Failed(_) => {
            error!(delivery_id = %delivery_id, "Pull request was not filed");
            "failed"
        }
    };

    Ok(Json(json!({ "status": status, "report": report })))
}
