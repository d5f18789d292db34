//! Newtype domain identifiers.
//!
//! GitHub hands out several kinds of identity for the same object: a REST
//! database id, a per-repository number, and a GraphQL global node id. Each is
//! represented as a distinct newtype so that, for example, a [`PullRequestId`]
//! can never be passed where a [`PullRequestNumber`] is expected even though
//! both are `u64` under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or_else(|| format!("{} must not be empty", stringify!($name)))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (GitHub-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — GitHub-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// Identifies a classic (REST) project board.
    ClassicProjectId
}

u64_id! {
    /// Identifies a column on a classic project board.
    ColumnId
}

u64_id! {
    /// Identifies a card created on a classic project board column.
    CardId
}

u64_id! {
    /// The REST database id of a pull request.
    ///
    /// This is the `content_id` the classic card API expects, not the number
    /// shown in the GitHub UI.
    PullRequestId
}

u64_id! {
    /// The per-repository pull request number (`#42`).
    PullRequestNumber
}

u64_id! {
    /// The number of a ProjectV2 board within its owning organization.
    ProjectNumber
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies one handled webhook event.
///
/// Generated fresh for every invocation of the filer and recorded on the
/// tracing span so that every log line of a single filing can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a new random invocation identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// A GraphQL global node id (e.g. `"PVT_kwDOBc..."`, `"PR_kwDOA..."`).
    ///
    /// Used by the ProjectV2 API to reference projects, fields, options,
    /// items, and pull requests across mutations.
    NodeId
}

string_id! {
    /// The login of the organization that owns a ProjectV2 board.
    OwnerLogin
}

string_id! {
    /// A repository in `"owner/repo"` format.
    RepositoryName
}

string_id! {
    /// The human-readable name of a board column or status option (e.g. `"ToDo"`).
    ///
    /// Matching against board data is case-insensitive; see [`crate::selection`].
    ColumnName
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;
