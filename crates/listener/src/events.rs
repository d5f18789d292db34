//! GitHub webhook payloads.
//!
//! Only the members the filer needs are modelled; GitHub sends far more and
//! everything else is ignored.

use serde::Deserialize;

use filing::{NodeId, OpenedPullRequest, PullRequestId, PullRequestNumber, RepositoryName};

/// Value of the `X-GitHub-Event` header for pull request events.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Value of the `X-GitHub-Event` header GitHub sends when a hook is created.
pub const PING_EVENT: &str = "ping";

/// The `action` of a newly opened pull request.
pub const OPENED_ACTION: &str = "opened";

/// A `pull_request` webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// `opened`, `closed`, `synchronize`, ...
    pub action: String,
    /// The pull request the event is about.
    pub pull_request: PullRequestPayload,
    /// Repository the pull request belongs to.
    #[serde(default)]
    pub repository: Option<RepositoryPayload>,
}

/// Pull request members of a `pull_request` event.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    /// REST database id.
    pub id: PullRequestId,
    /// GraphQL node id.
    pub node_id: NodeId,
    /// Per-repository number.
    pub number: PullRequestNumber,
    /// Title, for log lines.
    #[serde(default)]
    pub title: Option<String>,
}

/// Repository members of a webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    /// `owner/repo`.
    pub full_name: RepositoryName,
}

impl PullRequestEvent {
    /// Returns `true` for `pull_request.opened`.
    pub fn is_opened(&self) -> bool {
        self.action == OPENED_ACTION
    }

    /// The pull request as the filer sees it.
    pub fn opened_pull_request(&self) -> OpenedPullRequest {
        OpenedPullRequest {
            id: self.pull_request.id,
            node_id: self.pull_request.node_id.clone(),
            number: self.pull_request.number,
            repository: self.repository.as_ref().map(|r| r.full_name.clone()),
        }
    }
}
