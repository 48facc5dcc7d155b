//! Error handling for TableKit
//!
//! Provides the error types shared by every layer of the floor-plan editor:
//! - Import errors (structurally invalid user-supplied plan data)
//! - Persistence errors (the external repository rejected or failed a call)
//! - Permission errors (a gated entry point was called without the capability)
//!
//! Missing-entity references are absent from this taxonomy:
//! store operations on unknown ids are no-ops, not errors.

use thiserror::Error;

/// Import error type
///
/// Raised when pasted or loaded plan JSON does not have the minimal
/// structure of a floor plan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// The input is not valid JSON at all
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The top-level value is not an object
    #[error("Floor plan must be a JSON object")]
    NotAnObject,

    /// `name` is missing or not a string
    #[error("Floor plan is missing a 'name' string")]
    MissingName,

    /// `tables` is missing or not an array
    #[error("Floor plan is missing a 'tables' array")]
    MissingTables,

    /// The data has the right skeleton but a field has the wrong shape
    #[error("Invalid floor plan structure: {0}")]
    InvalidStructure(String),
}

/// Persistence error type
///
/// Represents failures reported by the external floor-plan repository.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// The repository refused the write
    #[error("Save rejected: {reason}")]
    SaveRejected {
        /// Reason given by the repository.
        reason: String,
    },

    /// The plan does not exist in the repository
    #[error("Floor plan not found: {id}")]
    NotFound {
        /// The requested plan id.
        id: String,
    },

    /// The repository could not be reached
    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Main error type for TableKit
#[derive(Error, Debug)]
pub enum Error {
    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The current role lacks the capability for this action
    #[error("Permission denied: {action}")]
    PermissionDenied {
        /// The action that was attempted.
        action: String,
    },

    /// There is no current floor plan to operate on
    #[error("No floor plan is selected")]
    NoCurrentPlan,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Create a permission error for the given action
    pub fn permission_denied(action: impl Into<String>) -> Self {
        Self::PermissionDenied {
            action: action.into(),
        }
    }
}

/// Result type using TableKit's Error
pub type Result<T> = std::result::Result<T, Error>;
