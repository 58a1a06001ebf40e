//! Document Version Types
//!
//! Clause instances and the versioned document snapshots that hold them.
//!
//! A `DocumentVersion` owns its clauses by value. Cloning a version is a deep
//! copy, so no two versions ever share clause state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::ClauseDefinition;
use crate::placeholders::placeholders;

// ── Clause attributes ──

/// Per-clause editability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockLevel {
    /// Text is fixed from the moment a version is created.
    Locked,
    /// Text may change while the version is a draft.
    Editable,
    /// Text may change and the clause is outside compliance enforcement.
    Optional,
}

impl LockLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockLevel::Locked => "locked",
            LockLevel::Editable => "editable",
            LockLevel::Optional => "optional",
        }
    }
}

impl fmt::Display for LockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface on which a clause's content must be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Placement {
    /// Entry flow (claim / submission form).
    #[serde(rename = "Entry")]
    Entry,
    /// Public campaign page.
    #[serde(rename = "Public")]
    Public,
    /// Full terms and conditions document.
    #[serde(rename = "T&Cs", alias = "TermsAndConditions")]
    FullTerms,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Entry => "Entry",
            Placement::Public => "Public",
            Placement::FullTerms => "T&Cs",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Version lifecycle ──
// Draft → Published
// (no backward transitions; further work happens on a cloned draft)

/// Lifecycle state of a document version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Draft,
    Published,
}

impl VersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Draft => "draft",
            VersionStatus::Published => "published",
        }
    }

    /// Published is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, VersionStatus::Published)
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Clause instance ──

/// A clause as it exists inside one document version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseInstance {
    pub key: String,
    pub title: String,
    pub body: String,
    pub required: bool,
    pub lock_level: LockLevel,
    pub placements: Vec<Placement>,
}

impl ClauseInstance {
    /// Fresh instance carrying the definition's default body.
    pub fn from_definition(def: &ClauseDefinition) -> Self {
        Self {
            key: def.key.clone(),
            title: def.title.clone(),
            body: def.default_body.clone(),
            required: def.required,
            lock_level: def.lock_level,
            placements: def.placements.clone(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_level == LockLevel::Locked
    }

    /// Empty or whitespace-only body.
    pub fn is_blank(&self) -> bool {
        is_blank(&self.body)
    }

    /// Required clause whose body is blank.
    pub fn is_missing(&self) -> bool {
        self.required && self.is_blank()
    }

    pub fn appears_on(&self, placement: Placement) -> bool {
        self.placements.contains(&placement)
    }
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

// ── Document version ──

/// One numbered snapshot of the terms document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    pub version_number: u32,
    pub status: VersionStatus,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    pub clauses: Vec<ClauseInstance>,
}

impl DocumentVersion {
    /// New draft holding the given clauses.
    pub fn draft(version_number: u32, clauses: Vec<ClauseInstance>) -> Self {
        Self {
            version_number,
            status: VersionStatus::Draft,
            approved_by: None,
            approved_at: None,
            clauses,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == VersionStatus::Draft
    }

    pub fn clause(&self, key: &str) -> Option<&ClauseInstance> {
        self.clauses.iter().find(|c| c.key == key)
    }

    pub(crate) fn clause_mut(&mut self, key: &str) -> Option<&mut ClauseInstance> {
        self.clauses.iter_mut().find(|c| c.key == key)
    }

    /// Clauses that must be shown on `placement`, in catalog order.
    pub fn clauses_for(&self, placement: Placement) -> Vec<&ClauseInstance> {
        self.clauses
            .iter()
            .filter(|c| c.appears_on(placement))
            .collect()
    }

    /// Placeholder tokens still present in each clause body.
    ///
    /// Informational only; placeholders never affect compliance.
    pub fn unresolved_placeholders(&self) -> BTreeMap<String, Vec<String>> {
        self.clauses
            .iter()
            .filter_map(|c| {
                let tokens = placeholders(&c.body);
                (!tokens.is_empty()).then(|| (c.key.clone(), tokens))
            })
            .collect()
    }

    /// Short label, e.g. `v2 — draft`.
    pub fn label(&self) -> String {
        format!("v{} — {}", self.version_number, self.status)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
