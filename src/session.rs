//! Editor session
//!
//! Wraps the engine with the transient caller state of the T&C editor: which
//! clause is selected and the approver name typed so far. Neither is part of
//! the document; both are lost when the session ends.
//!
//! Caller actions arrive as [`Intent`]s and are applied against the active
//! version. [`SessionView`] is what a renderer needs to draw the editor.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::ClauseCatalog;
use crate::compliance::ComplianceReport;
use crate::engine::ClauseVersionEngine;
use crate::error::{Result, TermsError};
use crate::history::VersionSummary;
use crate::types::{ClauseInstance, DocumentVersion};

/// A single caller action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SelectClause { key: String },
    /// Edit the selected clause, or `key` when given.
    EditBody {
        #[serde(default)]
        key: Option<String>,
        body: String,
    },
    /// Reset the selected clause, or `key` when given.
    ResetClause {
        #[serde(default)]
        key: Option<String>,
    },
    SetApprover { name: String },
    Publish,
    NewDraft,
    SwitchVersion { version: u32 },
}

/// What an intent changed, for callers that log or display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IntentOutcome {
    Selected { key: String },
    Edited { version: u32, key: String },
    Reset { version: u32, key: String },
    ApproverSet,
    Published { version: u32 },
    DraftCreated { version: u32 },
    Switched { version: u32 },
}

/// Renderer read model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView<'a> {
    pub active: &'a DocumentVersion,
    pub selected: Option<&'a ClauseInstance>,
    pub compliance: ComplianceReport,
    pub can_publish: bool,
    pub approver_name: &'a str,
    pub versions: Vec<VersionSummary>,
}

/// One caller's editing session over a terms document.
#[derive(Debug, Clone)]
pub struct EditorSession {
    engine: ClauseVersionEngine,
    selected_key: String,
    approver_name: String,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(ClauseVersionEngine::default())
    }
}

impl EditorSession {
    /// Session over `engine`, first catalog clause selected.
    pub fn new(engine: ClauseVersionEngine) -> Self {
        let selected_key = engine.catalog().first_key().to_string();
        Self {
            engine,
            selected_key,
            approver_name: String::new(),
        }
    }

    pub fn with_catalog(catalog: Arc<ClauseCatalog>) -> Self {
        Self::new(ClauseVersionEngine::new(catalog))
    }

    pub fn engine(&self) -> &ClauseVersionEngine {
        &self.engine
    }

    pub fn into_engine(self) -> ClauseVersionEngine {
        self.engine
    }

    pub fn selected_key(&self) -> &str {
        &self.selected_key
    }

    pub fn approver_name(&self) -> &str {
        &self.approver_name
    }

    /// Selected clause as it stands in the active version.
    pub fn selected_clause(&self) -> Option<&ClauseInstance> {
        self.engine.active_version().clause(&self.selected_key)
    }

    /// Apply one intent to the active version.
    pub fn apply(&mut self, intent: Intent) -> Result<IntentOutcome> {
        debug!(?intent, active = self.engine.active_version_number(), "Applying intent");
        let active = self.engine.active_version_number();

        match intent {
            Intent::SelectClause { key } => {
                if self.engine.active_version().clause(&key).is_none() {
                    return Err(self.engine.reject(TermsError::UnknownClause { key }));
                }
                self.selected_key = key.clone();
                Ok(IntentOutcome::Selected { key })
            }
            Intent::EditBody { key, body } => {
                let key = key.unwrap_or_else(|| self.selected_key.clone());
                self.engine.edit_clause_body(active, &key, body)?;
                Ok(IntentOutcome::Edited {
                    version: active,
                    key,
                })
            }
            Intent::ResetClause { key } => {
                let key = key.unwrap_or_else(|| self.selected_key.clone());
                self.engine.reset_clause_to_default(active, &key)?;
                Ok(IntentOutcome::Reset {
                    version: active,
                    key,
                })
            }
            Intent::SetApprover { name } => {
                self.approver_name = name;
                Ok(IntentOutcome::ApproverSet)
            }
            Intent::Publish => {
                self.engine.publish(active, &self.approver_name)?;
                Ok(IntentOutcome::Published { version: active })
            }
            Intent::NewDraft => {
                let version = self.engine.create_draft_from_version(active)?;
                Ok(IntentOutcome::DraftCreated { version })
            }
            Intent::SwitchVersion { version } => {
                self.engine.set_active_version(version)?;
                Ok(IntentOutcome::Switched { version })
            }
        }
    }

    /// Apply intents in order, stopping at the first rejection.
    ///
    /// Returns the outcomes of the intents that succeeded and the error that
    /// stopped the run, if any.
    pub fn apply_all(
        &mut self,
        intents: impl IntoIterator<Item = Intent>,
    ) -> (Vec<IntentOutcome>, Option<TermsError>) {
        let mut outcomes = Vec::new();
        for intent in intents {
            match self.apply(intent) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => return (outcomes, Some(e)),
            }
        }
        (outcomes, None)
    }

    pub fn can_publish(&self) -> bool {
        self.engine
            .can_publish(self.engine.active_version_number(), &self.approver_name)
    }

    pub fn view(&self) -> SessionView<'_> {
        let active = self.engine.active_version();
        SessionView {
            active,
            selected: active.clause(&self.selected_key),
            compliance: self
                .engine
                .compute_compliance_status(active.version_number),
            can_publish: self.can_publish(),
            approver_name: &self.approver_name,
            versions: self.engine.history().summaries(),
        }
    }
}
