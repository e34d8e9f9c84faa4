//! Error taxonomy shared by every store backend.
//!
//! The local and remote backends must surface identical error kinds so that
//! callers can branch on them without knowing which backend they hold. A
//! lookup miss is always [`StoreError::DoesNotExist`], whether it came from a
//! `HashMap` probe or an HTTP 404.

use std::fmt;

use thiserror::Error;

/// The interesting parts of an HTTP response, carried on remote failures so
/// callers can inspect what the server actually said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseInfo {
    /// Numeric status code.
    pub status: u16,
    /// Canonical reason phrase, if known.
    pub status_text: String,
    /// Response headers as (name, value) pairs. Values that are not valid
    /// UTF-8 are rendered lossily.
    pub headers: Vec<(String, String)>,
}

impl fmt::Display for ResponseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {} {}", self.status, self.status_text)
    }
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested key is not in the collection. Recoverable; callers are
    /// expected to branch on this. The remote backend maps HTTP 404 here.
    #[error("document does not exist: {0}")]
    DoesNotExist(String),

    /// An index was used for a query but has no encoder registered in the
    /// store's `IndexMap`. A setup defect, deliberately distinct from
    /// `DoesNotExist`.
    #[error("no query encoder registered for index '{0}'")]
    MissingIndex(String),

    /// A 200 response carried a body that is not parsable JSON. Indicates a
    /// server contract violation, never silently swallowed.
    #[error("malformed response body: {0}")]
    Protocol(String),

    /// Any other non-2xx, non-404 response. Carries the original response
    /// metadata for diagnosis.
    #[error("remote call failed: {0}")]
    Remote(ResponseInfo),

    /// The request never produced a response (connection refused, DNS
    /// failure, body read interrupted, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// Invalid client or store configuration, e.g. an unparsable base URL.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The patch engine rejected a bulk patch. Propagated unmodified; the
    /// store's state is untouched when this is returned.
    #[error("patch application failed: {0}")]
    Patch(String),

    /// JSON encode/decode plumbing failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True if this is a lookup miss, from either backend.
    pub fn is_does_not_exist(&self) -> bool {
        matches!(self, StoreError::DoesNotExist(_))
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
