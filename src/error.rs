//! Typed error model for the clause version engine.
//!
//! Every rejected operation maps to exactly one `TermsError` variant. All of
//! them are local validation failures: the document history is left exactly
//! as it was before the call.
//!
//! ## Rules
//!
//! - `thiserror` for enum derivation, no manual `Display` impls.
//! - Catalog construction has its own error type (`CatalogError`) because it
//!   happens before any engine exists.

use serde::{Deserialize, Serialize};

use crate::types::VersionStatus;

// ---------------------------------------------------------------------------
// TermsError — engine operation failures
// ---------------------------------------------------------------------------

/// Failure modes of the engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "error_kind", rename_all = "snake_case")]
pub enum TermsError {
    /// Version number is not present in the document history.
    #[error("Unknown version: v{version}")]
    UnknownVersion { version: u32 },

    /// Clause key is not part of the catalog (or of the target version).
    #[error("Unknown clause: {key}")]
    UnknownClause { key: String },

    /// Mutation attempted on a version that is no longer a draft.
    #[error("Version v{version} is {status} and cannot be modified")]
    InvalidState { version: u32, status: VersionStatus },

    /// Body edit attempted on a clause whose text is fixed.
    #[error("Clause {key} is locked and cannot be edited")]
    LockedClause { key: String },

    /// Publish gate rejected the request (compliance or approver name).
    #[error("Cannot publish v{version}: {}", reasons.join("; "))]
    PublishPreconditionFailed { version: u32, reasons: Vec<String> },

    /// No version number is left above the latest one.
    #[error("Cannot allocate a version after v{latest}")]
    VersionLimitReached { latest: u32 },
}

impl TermsError {
    /// Stable snake_case code, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            TermsError::UnknownVersion { .. } => "unknown_version",
            TermsError::UnknownClause { .. } => "unknown_clause",
            TermsError::InvalidState { .. } => "invalid_state",
            TermsError::LockedClause { .. } => "locked_clause",
            TermsError::PublishPreconditionFailed { .. } => "publish_precondition_failed",
            TermsError::VersionLimitReached { .. } => "version_limit_reached",
        }
    }
}

pub type Result<T> = std::result::Result<T, TermsError>;

// ---------------------------------------------------------------------------
// CatalogError — catalog construction failures
// ---------------------------------------------------------------------------

/// Reasons a clause catalog is rejected at load time.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog has no clauses")]
    Empty,

    #[error("Clause at position {index} has a blank key")]
    BlankKey { index: usize },

    #[error("Duplicate clause key: {key}")]
    DuplicateKey { key: String },

    #[error("Clause {key} is required but carries the optional lock level")]
    RequiredButOptional { key: String },

    #[error("Catalog YAML is invalid: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
