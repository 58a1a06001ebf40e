//! Document history
//!
//! Version number → snapshot mapping plus the active-version pointer.
//!
//! Invariants:
//! - the active version always exists in the map
//! - version numbers are allocated as `latest + 1`, so they only grow
//! - approval fields are set exactly when a version is published
//! - versions are never removed

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::catalog::ClauseCatalog;
use crate::types::{ClauseInstance, DocumentVersion, VersionStatus};

/// Every version of one terms document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "HistoryRecord")]
pub struct DocumentHistory {
    pub document_id: Uuid,
    versions: BTreeMap<u32, DocumentVersion>,
    active_version: u32,
}

/// Unchecked wire form; `DocumentHistory` is only built from it after the
/// invariants hold.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRecord {
    document_id: Uuid,
    versions: BTreeMap<u32, DocumentVersion>,
    active_version: u32,
}

impl TryFrom<HistoryRecord> for DocumentHistory {
    type Error = String;

    fn try_from(raw: HistoryRecord) -> Result<Self, Self::Error> {
        if let Some((key, v)) = raw.versions.iter().find(|(k, v)| **k != v.version_number) {
            return Err(format!(
                "version stored under {} claims number {}",
                key, v.version_number
            ));
        }
        if raw.versions.contains_key(&0) {
            return Err("version numbers start at 1".to_string());
        }
        for v in raw.versions.values() {
            let approved = (v.approved_by.is_some(), v.approved_at.is_some());
            match (v.status, approved) {
                (VersionStatus::Draft, (false, false)) => {}
                (VersionStatus::Published, (true, true)) => {}
                (VersionStatus::Draft, _) => {
                    return Err(format!(
                        "draft v{} carries approval fields",
                        v.version_number
                    ));
                }
                (VersionStatus::Published, _) => {
                    return Err(format!(
                        "published v{} is missing approvedBy or approvedAt",
                        v.version_number
                    ));
                }
            }
        }
        if !raw.versions.contains_key(&raw.active_version) {
            return Err(format!(
                "active version v{} is not in the history",
                raw.active_version
            ));
        }
        Ok(Self {
            document_id: raw.document_id,
            versions: raw.versions,
            active_version: raw.active_version,
        })
    }
}

/// Row in a version picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub version_number: u32,
    pub status: VersionStatus,
    pub approved_by: Option<String>,
    pub active: bool,
}

impl DocumentHistory {
    /// History holding one draft (v1) cloned from the catalog.
    pub fn seeded(catalog: &ClauseCatalog) -> Self {
        let clauses = catalog.iter().map(ClauseInstance::from_definition).collect();
        let mut versions = BTreeMap::new();
        versions.insert(1, DocumentVersion::draft(1, clauses));
        Self {
            document_id: Uuid::new_v4(),
            versions,
            active_version: 1,
        }
    }

    pub fn get(&self, version_number: u32) -> Option<&DocumentVersion> {
        self.versions.get(&version_number)
    }

    pub fn contains(&self, version_number: u32) -> bool {
        self.versions.contains_key(&version_number)
    }

    pub fn active_version_number(&self) -> u32 {
        self.active_version
    }

    pub fn active(&self) -> &DocumentVersion {
        // seeded with v1 and the pointer only moves to present versions
        &self.versions[&self.active_version]
    }

    /// Highest allocated version number.
    pub fn latest_version_number(&self) -> u32 {
        self.versions.keys().next_back().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Versions in ascending order.
    pub fn versions(&self) -> impl Iterator<Item = &DocumentVersion> {
        self.versions.values()
    }

    /// Picker rows, newest first.
    pub fn summaries(&self) -> Vec<VersionSummary> {
        self.versions
            .values()
            .rev()
            .map(|v| VersionSummary {
                version_number: v.version_number,
                status: v.status,
                approved_by: v.approved_by.clone(),
                active: v.version_number == self.active_version,
            })
            .collect()
    }

    /// Latest published version, if any.
    pub fn latest_published(&self) -> Option<&DocumentVersion> {
        self.versions
            .values()
            .rev()
            .find(|v| v.status == VersionStatus::Published)
    }

    /// Pretty JSON export of the whole history.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    // ── crate-internal mutation, used by the engine ──

    /// Replace a stored version with its updated copy.
    pub(crate) fn replace(&mut self, version: DocumentVersion) {
        self.versions.insert(version.version_number, version);
    }

    pub(crate) fn set_active(&mut self, version_number: u32) {
        debug_assert!(self.contains(version_number));
        self.active_version = version_number;
    }
}
