//! Filing of newly opened pull requests onto a project board.
//!
//! [`PullRequestFiler::file`] runs the lookup-then-mutate sequence for the
//! configured [`BoardTarget`]:
//!
//! | Target | Lookups | Mutations |
//! |--------|---------|-----------|
//! | [`BoardTarget::Classic`] | project, columns | create card |
//! | [`BoardTarget::ProjectV2`] | project + fields | add item, set status |
//!
//! [`PullRequestFiler::handle`] wraps a single attempt: it never fails, it
//! logs the outcome and returns a [`FilingReport`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, Instrument};

use crate::selection::{find_column, select_status_target};
use crate::{
    ClassicProjectBoard, ClassicProjectId, ColumnName, ConfigurationError, FilingError,
    FilingOutcome, FilingReport, InvocationId, OpenedPullRequest, OwnerLogin, Placement,
    ProjectNumber, ProjectV2Board, Timestamp,
};

/// Field name used for board columns on ProjectV2 boards unless configured otherwise.
pub const DEFAULT_STATUS_FIELD: &str = "Status";

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// A column on a classic project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicTarget {
    /// The project to file into.
    pub project_id: ClassicProjectId,
    /// Column name, matched case-insensitively.
    pub column: ColumnName,
}

/// A status option on a ProjectV2 board owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectV2Target {
    /// Organization that owns the project.
    pub owner: OwnerLogin,
    /// Project number within the organization.
    pub project_number: ProjectNumber,
    /// Status option name, matched case-insensitively.
    pub column: ColumnName,
    /// Name of the single-select field holding the columns, matched exactly.
    pub status_field: String,
}

/// Where opened pull requests are filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardTarget {
    /// Legacy REST column API.
    Classic(ClassicTarget),
    /// GraphQL ProjectV2 API.
    ProjectV2(ProjectV2Target),
}

impl BoardTarget {
    /// Builds a classic target, rejecting a zero project id or an empty column.
    pub fn classic(project_id: u64, column: &str) -> Result<Self, ConfigurationError> {
        if project_id == 0 {
            return Err(ConfigurationError::new("board.project_id must be positive"));
        }
        Ok(Self::Classic(ClassicTarget {
            project_id: ClassicProjectId::new(project_id),
            column: column_name(column)?,
        }))
    }

    /// Builds a ProjectV2 target.
    ///
    /// `status_field` defaults to [`DEFAULT_STATUS_FIELD`].
    pub fn project_v2(
        owner: &str,
        project_number: u64,
        column: &str,
        status_field: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        let owner = OwnerLogin::new(owner.trim())
            .ok_or_else(|| ConfigurationError::new("board.owner must not be empty"))?;
        if project_number == 0 {
            return Err(ConfigurationError::new(
                "board.project_number must be positive",
            ));
        }
        let status_field = status_field.unwrap_or(DEFAULT_STATUS_FIELD);
        if status_field.trim().is_empty() {
            return Err(ConfigurationError::new(
                "board.status_field must not be empty",
            ));
        }
        Ok(Self::ProjectV2(ProjectV2Target {
            owner,
            project_number: ProjectNumber::new(project_number),
            column: column_name(column)?,
            status_field: status_field.to_string(),
        }))
    }

    /// The configured column name.
    pub fn column(&self) -> &ColumnName {
        match self {
            Self::Classic(target) => &target.column,
            Self::ProjectV2(target) => &target.column,
        }
    }
}

impl std::fmt::Display for BoardTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classic(t) => write!(f, "classic project {} column \"{}\"", t.project_id, t.column),
            Self::ProjectV2(t) => write!(
                f,
                "project {}/#{} {} \"{}\"",
                t.owner, t.project_number, t.status_field, t.column
            ),
        }
    }
}

fn column_name(column: &str) -> Result<ColumnName, ConfigurationError> {
    ColumnName::new(column.trim())
        .ok_or_else(|| ConfigurationError::new("board.column must not be empty"))
}

// ---------------------------------------------------------------------------
// Filer
// ---------------------------------------------------------------------------

enum Backend {
    Classic {
        api: Arc<dyn ClassicProjectBoard>,
        target: ClassicTarget,
    },
    ProjectV2 {
        api: Arc<dyn ProjectV2Board>,
        target: ProjectV2Target,
    },
}

/// Files opened pull requests into one configured board column.
pub struct PullRequestFiler {
    backend: Backend,
}

impl PullRequestFiler {
    /// Creates a filer for a classic project column.
    pub fn classic(api: Arc<dyn ClassicProjectBoard>, target: ClassicTarget) -> Self {
        Self {
            backend: Backend::Classic { api, target },
        }
    }

    /// Creates a filer for a ProjectV2 status option.
    pub fn project_v2(api: Arc<dyn ProjectV2Board>, target: ProjectV2Target) -> Self {
        Self {
            backend: Backend::ProjectV2 { api, target },
        }
    }

    /// The column pull requests are filed into.
    pub fn column(&self) -> &ColumnName {
        match &self.backend {
            Backend::Classic { target, .. } => &target.column,
            Backend::ProjectV2 { target, .. } => &target.column,
        }
    }

    /// Files `pull_request` into the configured column.
    pub async fn file(&self, pull_request: &OpenedPullRequest) -> Result<Placement, FilingError> {
        match &self.backend {
            Backend::Classic { api, target } => {
                file_classic(api.as_ref(), target, pull_request).await
            }
            Backend::ProjectV2 { api, target } => {
                file_project_v2(api.as_ref(), target, pull_request).await
            }
        }
    }

    /// Files `pull_request` and logs the outcome.
    ///
    /// Errors are logged and folded into the returned report; nothing is
    /// retried.
    pub async fn handle(&self, pull_request: &OpenedPullRequest) -> FilingReport {
        let invocation = InvocationId::new_random();
        let number = pull_request.number;
        let column = self.column().clone();
        let span = info_span!(
            "file_pull_request",
            invocation = %invocation,
            pr_number = %number,
            repository = pull_request.repository.as_ref().map(|r| r.as_str()).unwrap_or(""),
        );

        let outcome = async {
            match self.file(pull_request).await {
                Ok(placement) => {
                    info!(column = %column, "Added PR #{number} to project column {column}");
                    FilingOutcome::Filed(placement)
                }
                Err(e) if e.is_not_found() => {
                    error!(column = %column, error = %e, "Could not file PR #{number}");
                    FilingOutcome::NotFound(e.to_string())
                }
                Err(e) => {
                    error!(error = %e, "Error adding PR #{number} to project");
                    FilingOutcome::Failed(e.to_string())
                }
            }
        }
        .instrument(span)
        .await;

        FilingReport {
            invocation,
            pull_request: number,
            column,
            outcome,
            finished_at: Timestamp::now(),
        }
    }
}

async fn file_classic(
    api: &dyn ClassicProjectBoard,
    target: &ClassicTarget,
    pull_request: &OpenedPullRequest,
) -> Result<Placement, FilingError> {
    let project = api.get_project(target.project_id).await?;
    debug!(
        project_id = %project.id,
        project_name = %project.name,
        state = project.state.as_deref().unwrap_or("unknown"),
        "Fetched classic project"
    );

    let columns = api.list_columns(target.project_id).await?;
    let column = find_column(&columns, target.column.as_str()).ok_or_else(|| {
        FilingError::ColumnNotFound {
            column: target.column.to_string(),
            project: target.project_id.to_string(),
        }
    })?;
    info!(
        column_id = %column.id,
        "Column Id for Column Name {} is {}",
        target.column,
        column.id
    );

    let card_id = api.create_card(column.id, pull_request.id).await?;
    info!(
        card_id = %card_id,
        "Created project card {card_id} for PR #{}",
        pull_request.number
    );

    Ok(Placement::ClassicCard {
        column_id: column.id,
        card_id,
    })
}

async fn file_project_v2(
    api: &dyn ProjectV2Board,
    target: &ProjectV2Target,
    pull_request: &OpenedPullRequest,
) -> Result<Placement, FilingError> {
    let project_ref = format!("{}/#{}", target.owner, target.project_number);

    let snapshot = api.fetch_project(&target.owner, target.project_number).await?;
    debug!(
        project_id = %snapshot.id,
        field_count = snapshot.fields.len(),
        "Fetched ProjectV2 board"
    );

    let status = select_status_target(
        &snapshot,
        &target.status_field,
        target.column.as_str(),
        &project_ref,
    )?;

    let item_id = api.add_item(&snapshot.id, &pull_request.node_id).await?;
    debug!(item_id = %item_id, "Added pull request to project");

    api.set_single_select(&snapshot.id, &item_id, &status).await?;
    debug!(
        item_id = %item_id,
        option_id = %status.option_id,
        "Set project item status"
    );

    Ok(Placement::ProjectItem {
        item_id,
        option_id: status.option_id,
    })
}

#[cfg(test)]
#[path = "filer_tests.rs"]
mod tests;
