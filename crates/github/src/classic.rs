//! Classic projects over the REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use filing::{
    BoardApiError, CardId, ClassicColumn, ClassicProject, ClassicProjectBoard, ClassicProjectId,
    ColumnId, PullRequestId,
};

use crate::GitHubClient;

/// Columns requested per page; boards with more columns than this are not supported.
const COLUMNS_PER_PAGE: u32 = 100;

#[derive(Debug, Serialize)]
struct CreateCardRequest {
    content_id: PullRequestId,
    content_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct CardResponse {
    id: CardId,
}

#[async_trait]
impl ClassicProjectBoard for GitHubClient {
    #[instrument(skip(self), fields(project_id = %project))]
    async fn get_project(&self, project: ClassicProjectId) -> Result<ClassicProject, BoardApiError> {
        self.get(&format!("/projects/{project}")).await
    }

    #[instrument(skip(self), fields(project_id = %project))]
    async fn list_columns(
        &self,
        project: ClassicProjectId,
    ) -> Result<Vec<ClassicColumn>, BoardApiError> {
        self.get(&format!(
            "/projects/{project}/columns?per_page={COLUMNS_PER_PAGE}"
        ))
        .await
    }

    #[instrument(skip(self), fields(column_id = %column, pull_request_id = %pull_request))]
    async fn create_card(
        &self,
        column: ColumnId,
        pull_request: PullRequestId,
    ) -> Result<CardId, BoardApiError> {
        let request = CreateCardRequest {
            content_id: pull_request,
            content_type: "PullRequest",
        };
        let card: CardResponse = self
            .post(&format!("/projects/columns/{column}/cards"), &request)
            .await?;
        Ok(card.id)
    }
}
