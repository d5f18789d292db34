//! Port traits implemented by infrastructure adapters.
//!
//! The two traits correspond to the two GitHub project APIs. Both are
//! dyn-compatible so that [`crate::PullRequestFiler`] can hold either behind an
//! `Arc<dyn ...>` and tests can substitute recording fakes.

use async_trait::async_trait;

use crate::{
    BoardApiError, CardId, ClassicColumn, ClassicProject, ClassicProjectId, ColumnId, NodeId,
    OwnerLogin, ProjectNumber, ProjectV2Snapshot, PullRequestId, StatusTarget,
};

/// Access to a classic (REST) project board.
#[async_trait]
pub trait ClassicProjectBoard: Send + Sync {
    /// Fetches the project's metadata.
    async fn get_project(&self, project: ClassicProjectId) -> Result<ClassicProject, BoardApiError>;

    /// Lists the project's columns in board order.
    async fn list_columns(
        &self,
        project: ClassicProjectId,
    ) -> Result<Vec<ClassicColumn>, BoardApiError>;

    /// Creates a card for `pull_request` in `column`.
    async fn create_card(
        &self,
        column: ColumnId,
        pull_request: PullRequestId,
    ) -> Result<CardId, BoardApiError>;
}

/// Access to a ProjectV2 (GraphQL) board.
#[async_trait]
pub trait ProjectV2Board: Send + Sync {
    /// Fetches the project id and its single-select fields.
    async fn fetch_project(
        &self,
        owner: &OwnerLogin,
        number: ProjectNumber,
    ) -> Result<ProjectV2Snapshot, BoardApiError>;

    /// Adds the content identified by `content` to the project and returns the
    /// new item's id.
    async fn add_item(&self, project: &NodeId, content: &NodeId) -> Result<NodeId, BoardApiError>;

    /// Sets a single-select field of `item` to the option in `target`.
    async fn set_single_select(
        &self,
        project: &NodeId,
        item: &NodeId,
        target: &StatusTarget,
    ) -> Result<(), BoardApiError>;
}
