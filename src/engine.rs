//! Clause Version Engine
//!
//! Owns the clause catalog and the document history, and enforces the edit
//! and publish rules:
//!
//! ```text
//! edit / reset  → version exists → clause exists → clause not locked → version is draft
//! publish       → version exists → draft + compliant + approver named
//! new draft     → copy of any existing version under latest + 1, made active
//! ```
//!
//! Every mutation works on a copy of the target version and writes it back
//! only once all checks passed, so a rejected call leaves the history
//! untouched.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::ClauseCatalog;
use crate::compliance::ComplianceReport;
use crate::error::{Result, TermsError};
use crate::history::DocumentHistory;
use crate::types::{is_blank, DocumentVersion, VersionStatus};

/// In-memory T&C document with its full version history.
#[derive(Debug, Clone)]
pub struct ClauseVersionEngine {
    catalog: Arc<ClauseCatalog>,
    history: DocumentHistory,
}

impl Default for ClauseVersionEngine {
    fn default() -> Self {
        Self::new(ClauseCatalog::builtin())
    }
}

impl ClauseVersionEngine {
    /// Engine seeded with one draft (v1) copied from `catalog`.
    pub fn new(catalog: Arc<ClauseCatalog>) -> Self {
        let history = DocumentHistory::seeded(&catalog);
        info!(
            document_id = %history.document_id,
            clauses = catalog.len(),
            "Seeded terms document"
        );
        Self { catalog, history }
    }

    /// Resume from a previously exported history.
    ///
    /// Clauses are not reconciled against `catalog`; reset uses the catalog
    /// for defaults only.
    pub fn from_history(catalog: Arc<ClauseCatalog>, history: DocumentHistory) -> Self {
        Self { catalog, history }
    }

    // ── Read model ──

    pub fn catalog(&self) -> &ClauseCatalog {
        &self.catalog
    }

    pub fn history(&self) -> &DocumentHistory {
        &self.history
    }

    pub fn version(&self, version_number: u32) -> Option<&DocumentVersion> {
        self.history.get(version_number)
    }

    pub fn active_version(&self) -> &DocumentVersion {
        self.history.active()
    }

    pub fn active_version_number(&self) -> u32 {
        self.history.active_version_number()
    }

    /// Required clauses with a blank body. Recomputed on every call.
    ///
    /// An unknown version has nothing to flag and yields an empty report.
    pub fn compute_compliance_status(&self, version_number: u32) -> ComplianceReport {
        match self.history.get(version_number) {
            Some(version) => ComplianceReport::evaluate(version),
            None => ComplianceReport {
                version_number,
                failing: Vec::new(),
            },
        }
    }

    /// Reasons `publish` would be rejected right now; empty when allowed.
    pub fn publish_blockers(&self, version_number: u32, approver_name: &str) -> Vec<String> {
        let Some(version) = self.history.get(version_number) else {
            return vec![format!("version v{} does not exist", version_number)];
        };

        let mut reasons = Vec::new();
        if version.status != VersionStatus::Draft {
            reasons.push(format!("version is {}", version.status));
        }
        let report = ComplianceReport::evaluate(version);
        if !report.is_compliant() {
            reasons.push(format!(
                "required clauses are blank: {}",
                report.failing.join(", ")
            ));
        }
        if is_blank(approver_name) {
            reasons.push("approver name is blank".to_string());
        }
        reasons
    }

    /// Draft, compliant, and a non-blank approver name.
    pub fn can_publish(&self, version_number: u32, approver_name: &str) -> bool {
        self.publish_blockers(version_number, approver_name)
            .is_empty()
    }

    // ── Mutations ──

    /// Replace one clause body in one version.
    pub fn edit_clause_body(
        &mut self,
        version_number: u32,
        clause_key: &str,
        new_body: impl Into<String>,
    ) -> Result<()> {
        let new_body = new_body.into();
        let mut version = self.editable_copy(version_number, clause_key)?;
        if let Some(clause) = version.clause_mut(clause_key) {
            clause.body = new_body;
        }
        self.history.replace(version);

        debug!(version = version_number, clause = clause_key, "Clause body edited");
        Ok(())
    }

    /// Put a clause body back to the catalog default.
    pub fn reset_clause_to_default(&mut self, version_number: u32, clause_key: &str) -> Result<()> {
        if !self.history.contains(version_number) {
            return Err(self.reject(TermsError::UnknownVersion {
                version: version_number,
            }));
        }
        let Some(default_body) = self
            .catalog
            .get(clause_key)
            .map(|def| def.default_body.clone())
        else {
            return Err(self.reject(TermsError::UnknownClause {
                key: clause_key.to_string(),
            }));
        };

        let mut version = self.editable_copy(version_number, clause_key)?;
        if let Some(clause) = version.clause_mut(clause_key) {
            clause.body = default_body;
        }
        self.history.replace(version);

        debug!(version = version_number, clause = clause_key, "Clause reset to default");
        Ok(())
    }

    /// Approve a draft. One-way: the version is immutable afterwards.
    pub fn publish(&mut self, version_number: u32, approver_name: &str) -> Result<()> {
        let Some(current) = self.history.get(version_number) else {
            return Err(self.reject(TermsError::UnknownVersion {
                version: version_number,
            }));
        };

        let reasons = self.publish_blockers(version_number, approver_name);
        if !reasons.is_empty() {
            return Err(self.reject(TermsError::PublishPreconditionFailed {
                version: version_number,
                reasons,
            }));
        }

        let mut version = current.clone();
        let approver = approver_name.trim().to_string();
        version.status = VersionStatus::Published;
        version.approved_by = Some(approver.clone());
        version.approved_at = Some(Utc::now());
        self.history.replace(version);

        info!(
            document_id = %self.history.document_id,
            version = version_number,
            approved_by = %approver,
            "Terms version published"
        );
        Ok(())
    }

    /// Copy any existing version into a new draft and make it active.
    ///
    /// Returns the new version number, always `latest + 1`.
    pub fn create_draft_from_version(&mut self, source_version: u32) -> Result<u32> {
        let Some(source) = self.history.get(source_version) else {
            return Err(self.reject(TermsError::UnknownVersion {
                version: source_version,
            }));
        };

        let latest = self.history.latest_version_number();
        let Some(next) = latest.checked_add(1) else {
            return Err(self.reject(TermsError::VersionLimitReached { latest }));
        };
        let draft = DocumentVersion::draft(next, source.clauses.clone());
        self.history.replace(draft);
        self.history.set_active(next);

        info!(
            document_id = %self.history.document_id,
            source = source_version,
            version = next,
            "New draft created"
        );
        Ok(next)
    }

    /// Move the active pointer. Document content is untouched.
    pub fn set_active_version(&mut self, version_number: u32) -> Result<()> {
        if !self.history.contains(version_number) {
            return Err(self.reject(TermsError::UnknownVersion {
                version: version_number,
            }));
        }
        self.history.set_active(version_number);
        debug!(version = version_number, "Active version switched");
        Ok(())
    }

    // ── Internals ──

    /// Copy of a version whose clause may be edited, after every gate passed.
    ///
    /// The lock check runs before the status check: a locked clause reports
    /// `LockedClause` whatever state the version is in.
    fn editable_copy(&self, version_number: u32, clause_key: &str) -> Result<DocumentVersion> {
        let Some(version) = self.history.get(version_number) else {
            return Err(self.reject(TermsError::UnknownVersion {
                version: version_number,
            }));
        };
        let Some(clause) = version.clause(clause_key) else {
            return Err(self.reject(TermsError::UnknownClause {
                key: clause_key.to_string(),
            }));
        };
        if clause.is_locked() {
            return Err(self.reject(TermsError::LockedClause {
                key: clause_key.to_string(),
            }));
        }
        if version.status.is_terminal() {
            return Err(self.reject(TermsError::InvalidState {
                version: version_number,
                status: version.status,
            }));
        }
        Ok(version.clone())
    }

    pub(crate) fn reject(&self, err: TermsError) -> TermsError {
        warn!(
            document_id = %self.history.document_id,
            code = err.code(),
            error = %err,
            "Terms operation rejected"
        );
        err
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
