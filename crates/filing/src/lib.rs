//! Core domain for filing newly opened pull requests onto a project board.
//!
//! This crate contains every domain concept, newtype identifier, value type,
//! and error type used by the service, plus the orchestration that turns a
//! `pull_request.opened` event into board mutations. Infrastructure crates
//! implement the traits in [`ports`]; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ColumnId`, `NodeId`, etc.) |
//! | [`types`] | Board data, pull request, and outcome types |
//! | [`errors`] | API, filing, and configuration errors |
//! | [`selection`] | Case-insensitive column and status-option lookup |
//! | [`ports`] | `ClassicProjectBoard` and `ProjectV2Board` traits |
//! | [`filer`] | `BoardTarget` and `PullRequestFiler` |

pub mod errors;
pub mod filer;
pub mod identifiers;
pub mod ports;
pub mod selection;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{BoardApiError, ConfigurationError, FilingError};
pub use filer::{
    BoardTarget, ClassicTarget, ProjectV2Target, PullRequestFiler, DEFAULT_STATUS_FIELD,
};
pub use identifiers::{
    CardId, ClassicProjectId, ColumnId, ColumnName, InvocationId, NodeId, OwnerLogin,
    ProjectNumber, PullRequestId, PullRequestNumber, RepositoryName,
};
pub use ports::{ClassicProjectBoard, ProjectV2Board};
pub use types::{
    ClassicColumn, ClassicProject, FilingOutcome, FilingReport, OpenedPullRequest, Placement,
    ProjectField, ProjectV2Snapshot, StatusOption, StatusTarget, Timestamp,
};
