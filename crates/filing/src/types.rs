//! Shared value types for the board filing domain.
//!
//! These are the shapes the port traits in [`crate::ports`] exchange with the
//! infrastructure adapters. They mirror what GitHub returns closely enough to
//! be deserialized directly, but carry the domain identifiers from
//! [`crate::identifiers`] instead of raw primitives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    CardId, ClassicProjectId, ColumnId, ColumnName, InvocationId, NodeId, PullRequestId,
    PullRequestNumber, RepositoryName,
};

// ---------------------------------------------------------------------------
// Classic projects
// ---------------------------------------------------------------------------

/// Metadata of a classic project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicProject {
    /// Project identifier.
    pub id: ClassicProjectId,
    /// Display name of the project.
    pub name: String,
    /// `"open"` or `"closed"`.
    #[serde(default)]
    pub state: Option<String>,
}

/// A column on a classic project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicColumn {
    /// Column identifier; the target of card creation.
    pub id: ColumnId,
    /// Display name of the column.
    pub name: String,
}

// ---------------------------------------------------------------------------
// ProjectV2
// ---------------------------------------------------------------------------

/// The parts of a ProjectV2 board needed to place an item into a status column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectV2Snapshot {
    /// Global node id of the project.
    pub id: NodeId,
    /// The first page of project fields.
    pub fields: Vec<ProjectField>,
}

/// One field of a ProjectV2 board.
///
/// The fields query only selects single-select fields, so every other field
/// kind (text, date, iteration, ...) comes back as an empty object. All
/// members are therefore optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectField {
    /// Global node id of the field.
    #[serde(default)]
    pub id: Option<NodeId>,
    /// Field name (e.g. `"Status"`).
    #[serde(default)]
    pub name: Option<String>,
    /// Options of a single-select field.
    #[serde(default)]
    pub options: Option<Vec<StatusOption>>,
}

/// An option of a single-select field; on a board this is a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOption {
    /// Option identifier. Passed as `singleSelectOptionId`.
    pub id: String,
    /// Option name (e.g. `"Todo"`).
    pub name: String,
}

/// The field and option a new project item's status is set to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTarget {
    /// Global node id of the status field.
    pub field_id: NodeId,
    /// Identifier of the selected option.
    pub option_id: String,
}

// ---------------------------------------------------------------------------
// Pull requests
// ---------------------------------------------------------------------------

/// The pull request carried by a `pull_request.opened` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedPullRequest {
    /// REST database id (used by the classic card API).
    pub id: PullRequestId,
    /// Global node id (used by the ProjectV2 API).
    pub node_id: NodeId,
    /// Per-repository number, used for log lines.
    pub number: PullRequestNumber,
    /// Repository the pull request was opened in, when the event carried it.
    #[serde(default)]
    pub repository: Option<RepositoryName>,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Where a pull request ended up after a successful filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// A card was created in a classic project column.
    ClassicCard {
        /// Column the card was created in.
        column_id: ColumnId,
        /// The new card.
        card_id: CardId,
    },
    /// The pull request was added to a ProjectV2 board and its status set.
    ProjectItem {
        /// The new project item.
        item_id: NodeId,
        /// Status option the item was moved to.
        option_id: String,
    },
}

/// Result of one invocation of [`crate::PullRequestFiler::handle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FilingOutcome {
    /// The pull request was filed.
    Filed(Placement),
    /// The configured column or status field does not exist on the board.
    NotFound(String),
    /// A GitHub API call failed.
    Failed(String),
}

impl FilingOutcome {
    /// Returns `true` if the pull request was filed.
    pub fn is_filed(&self) -> bool {
        matches!(self, Self::Filed(_))
    }
}

/// Record of one handled `pull_request.opened` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingReport {
    /// Correlation id of this invocation.
    pub invocation: InvocationId,
    /// The pull request number.
    pub pull_request: PullRequestNumber,
    /// The column the pull request was meant for.
    pub column: ColumnName,
    /// What happened.
    pub outcome: FilingOutcome,
    /// When handling finished.
    pub finished_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
