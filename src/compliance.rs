//! Compliance checks
//!
//! A version is compliant when every required clause has a non-blank body.
//! The report is derived from the clause list on every call and never stored
//! alongside the version, so it cannot drift from the actual text.

use serde::{Deserialize, Serialize};

use crate::types::DocumentVersion;

/// Required clauses currently failing the non-blank-body check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub version_number: u32,
    /// Failing clause keys, in catalog order
    pub failing: Vec<String>,
}

impl ComplianceReport {
    /// Evaluate a version.
    pub fn evaluate(version: &DocumentVersion) -> Self {
        let failing = version
            .clauses
            .iter()
            .filter(|c| c.is_missing())
            .map(|c| c.key.clone())
            .collect();

        Self {
            version_number: version.version_number,
            failing,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.failing.is_empty()
    }

    pub fn is_failing(&self, key: &str) -> bool {
        self.failing.iter().any(|k| k == key)
    }

    /// One-line status, e.g. for a dashboard tile.
    pub fn summary(&self) -> String {
        if self.is_compliant() {
            "All required clauses present".to_string()
        } else {
            format!("Missing content in: {}", self.failing.join(", "))
        }
    }
}
