//! Error types for the board filing domain.
//!
//! [`BoardApiError`] is what infrastructure adapters return from the port
//! traits in [`crate::ports`]. [`FilingError`] wraps it together with the
//! lookup misses that end a filing attempt without an API failure.
//! [`ConfigurationError`] is produced when a [`crate::BoardTarget`] cannot be
//! built from user configuration.
//!
//! None of these are retried. A failed filing is logged once and dropped.

use thiserror::Error;

// ---------------------------------------------------------------------------
// API errors
// ---------------------------------------------------------------------------

/// Failure of a single call against the project-management API.
#[derive(Debug, Error)]
pub enum BoardApiError {
    /// The request could not be sent or the response could not be read.
    #[error("Request to {endpoint} failed: {message}")]
    Transport {
        /// Path or URL of the call.
        endpoint: String,
        /// Underlying transport error text.
        message: String,
    },

    /// The API answered with a non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        /// Path or URL of the call.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// A GraphQL response carried an `errors` array.
    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQl {
        /// Messages of every reported error.
        messages: Vec<String>,
    },

    /// The response was well-formed but lacked the requested object
    /// (e.g. unknown organization or project number).
    #[error("Response is missing {what}")]
    MissingData {
        /// Description of the missing object.
        what: String,
    },

    /// The response body did not match the expected shape.
    #[error("Could not decode response from {endpoint}: {message}")]
    Decode {
        /// Path or URL of the call.
        endpoint: String,
        /// Decoder error text.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Filing errors
// ---------------------------------------------------------------------------

/// Reasons a pull request could not be filed.
#[derive(Debug, Error)]
pub enum FilingError {
    /// No column (classic) or status option (ProjectV2) matches the
    /// configured name.
    #[error("Column \"{column}\" not found in project {project}")]
    ColumnNotFound {
        /// The configured column name.
        column: String,
        /// Human-readable project reference.
        project: String,
    },

    /// The ProjectV2 board has no usable single-select field with the
    /// configured name.
    #[error("Field \"{field}\" not found in project {project}")]
    StatusFieldNotFound {
        /// The configured field name.
        field: String,
        /// Human-readable project reference.
        project: String,
    },

    /// A call against the API failed.
    #[error(transparent)]
    Api(#[from] BoardApiError),
}

impl FilingError {
    /// Returns `true` for lookup misses, `false` for API failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ColumnNotFound { .. } | Self::StatusFieldNotFound { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// The board configuration is invalid.
///
/// Produced at load time; the service never starts with an invalid target.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Configuration error: {message}")]
pub struct ConfigurationError {
    /// Description of the configuration problem.
    pub message: String,
}

impl ConfigurationError {
    /// Creates a new configuration error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
