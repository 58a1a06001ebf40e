//! Clause-based Terms & Conditions engine
//!
//! A small in-memory document-versioning engine for campaign T&Cs. It decides
//! which clauses may be edited, which must carry text, and how a document
//! moves from draft to published.
//!
//! Key concepts:
//! - The clause catalog is read-only reference data; each version holds its
//!   own copies of the clauses
//! - Locked clauses are fixed from the moment a version exists
//! - Published versions are immutable; further work happens on a new draft
//! - Compliance is derived from clause text on every read
//!
//! # Example
//!
//! ```
//! use cosmohub_terms::{ClauseVersionEngine, TermsError};
//!
//! let mut engine = ClauseVersionEngine::default();
//! engine.edit_clause_body(1, "promoter", "").unwrap();
//! assert_eq!(engine.compute_compliance_status(1).failing, vec!["promoter"]);
//!
//! engine.reset_clause_to_default(1, "promoter").unwrap();
//! engine.publish(1, "Ben Cook").unwrap();
//! assert!(matches!(
//!     engine.edit_clause_body(1, "eligibility", "x"),
//!     Err(TermsError::InvalidState { .. })
//! ));
//!
//! let v2 = engine.create_draft_from_version(1).unwrap();
//! assert_eq!(v2, 2);
//! ```

pub mod catalog;
pub mod compliance;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod placeholders;
pub mod session;
pub mod types;

pub use catalog::{ClauseCatalog, ClauseDefinition};
pub use compliance::ComplianceReport;
pub use config::EngineConfig;
pub use engine::ClauseVersionEngine;
pub use error::{CatalogError, Result, TermsError};
pub use history::{DocumentHistory, VersionSummary};
pub use placeholders::{fill_placeholders, placeholders, FillResult};
pub use session::{EditorSession, Intent, IntentOutcome, SessionView};
pub use types::{ClauseInstance, DocumentVersion, LockLevel, Placement, VersionStatus};
