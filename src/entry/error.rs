//! Error types for entry edit sessions

use crate::api::ApiError;
use std::fmt;
use thiserror::Error;

/// What a failed fetch was trying to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    ContentType,
    Entry,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentType => f.write_str("content type"),
            Self::Entry => f.write_str("entry"),
        }
    }
}

/// A schema or entry could not be retrieved
///
/// Fatal to the session for a content type; an entry failure only degrades
/// the session to defaulted values.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to fetch {resource} {id}: {source}")]
pub struct FetchError {
    pub resource: Resource,
    pub id: i64,
    #[source]
    pub source: ApiError,
}

impl FetchError {
    pub fn new(resource: Resource, id: i64, source: ApiError) -> Self {
        Self {
            resource,
            id,
            source,
        }
    }

    /// "Not found" as opposed to a generic fetch failure
    pub fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }
}

/// A submission did not go through; edits are kept and may be resubmitted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// The backend refused the create or update
    #[error("failed to save entry: {0}")]
    Rejected(#[from] ApiError),

    /// Required fields are blank and enforcement is on
    #[error("required fields are empty: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    /// The session has no editable state (still loading, failed, or busy)
    #[error("entry is not ready for submission")]
    NotEditable,
}
