//! Terms & Conditions — end-to-end publish scenario
//!
//! Walks the default catalog through the full editor lifecycle:
//! blank a required clause, restore it, publish v1, fail to edit it, and
//! carry its text into a fresh v2 draft.

use std::collections::HashMap;

use cosmohub_terms::{
    fill_placeholders, ClauseVersionEngine, EditorSession, Intent, LockLevel, Placement,
    TermsError, VersionStatus,
};

#[test]
fn default_catalog_shape() {
    let engine = ClauseVersionEngine::default();
    let catalog = engine.catalog();

    assert_eq!(catalog.len(), 11);
    assert_eq!(catalog.iter().filter(|d| d.required).count(), 9);
    let locked: Vec<&str> = catalog
        .iter()
        .filter(|d| d.lock_level == LockLevel::Locked)
        .map(|d| d.key.as_str())
        .collect();
    assert_eq!(locked, vec!["privacy", "liability"]);
}

#[test]
fn blank_restore_publish_and_redraft() {
    let mut engine = ClauseVersionEngine::default();

    // Blank a required clause
    engine.edit_clause_body(1, "promoter", "").unwrap();
    let report = engine.compute_compliance_status(1);
    assert_eq!(report.failing, vec!["promoter"]);
    assert!(!engine.can_publish(1, "Ben Cook"));

    // Restore it
    engine.reset_clause_to_default(1, "promoter").unwrap();
    assert!(engine.compute_compliance_status(1).is_compliant());
    assert!(engine.can_publish(1, "Ben Cook"));
    assert!(!engine.can_publish(1, ""));
    assert!(!engine.can_publish(1, "   "));

    // Publish
    engine.publish(1, "Ben Cook").unwrap();
    let v1 = engine.version(1).unwrap().clone();
    assert_eq!(v1.status, VersionStatus::Published);
    assert_eq!(v1.approved_by.as_deref(), Some("Ben Cook"));
    assert!(v1.approved_at.is_some());

    // Published is frozen
    let err = engine.edit_clause_body(1, "eligibility", "x").unwrap_err();
    assert!(matches!(err, TermsError::InvalidState { version: 1, .. }));
    assert_eq!(engine.version(1).unwrap(), &v1);

    // New draft carries v1's text
    let v2 = engine.create_draft_from_version(1).unwrap();
    assert_eq!(v2, 2);
    assert_eq!(engine.active_version_number(), 2);

    let draft = engine.version(2).unwrap();
    assert_eq!(draft.status, VersionStatus::Draft);
    assert!(draft.approved_by.is_none());
    assert!(draft.approved_at.is_none());
    let v1_bodies: Vec<&str> = v1.clauses.iter().map(|c| c.body.as_str()).collect();
    let v2_bodies: Vec<&str> = draft.clauses.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(v1_bodies, v2_bodies);

    // And is editable again
    engine.edit_clause_body(2, "eligibility", "Open to all UK residents.").unwrap();
    assert_eq!(
        engine.version(1).unwrap().clause("eligibility").unwrap().body,
        v1.clause("eligibility").unwrap().body
    );
}

#[test]
fn edits_carry_forward_into_new_draft() {
    let mut engine = ClauseVersionEngine::default();
    engine
        .edit_clause_body(1, "promoter", "The promoter of this campaign is Acme Ltd.")
        .unwrap();
    engine.publish(1, "Ben Cook").unwrap();

    let v2 = engine.create_draft_from_version(1).unwrap();
    assert_eq!(
        engine.version(v2).unwrap().clause("promoter").unwrap().body,
        "The promoter of this campaign is Acme Ltd."
    );
}

#[test]
fn session_script_matches_engine_calls() {
    let mut session = EditorSession::default();
    let (outcomes, err) = session.apply_all(vec![
        Intent::SelectClause {
            key: "promoter".into(),
        },
        Intent::EditBody {
            key: None,
            body: "".into(),
        },
        Intent::ResetClause { key: None },
        Intent::SetApprover {
            name: "Ben Cook".into(),
        },
        Intent::Publish,
        Intent::NewDraft,
    ]);
    assert!(err.is_none(), "unexpected rejection: {err:?}");
    assert_eq!(outcomes.len(), 6);

    let view = session.view();
    assert_eq!(view.active.version_number, 2);
    assert!(view.active.is_draft());
    assert!(view.compliance.is_compliant());
    assert_eq!(view.versions[1].status, VersionStatus::Published);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["active"]["versionNumber"], 2);
    assert_eq!(json["selected"]["key"], "promoter");
    assert_eq!(json["canPublish"], true);
}

#[test]
fn placement_views_and_placeholders() {
    let engine = ClauseVersionEngine::default();
    let v1 = engine.active_version();

    let entry: Vec<&str> = v1
        .clauses_for(Placement::Entry)
        .iter()
        .map(|c| c.key.as_str())
        .collect();
    assert_eq!(
        entry,
        vec!["eligibility", "how_to_enter", "dates", "cap_limits", "privacy"]
    );
    assert_eq!(v1.clauses_for(Placement::FullTerms).len(), 11);

    let pending = v1.unresolved_placeholders();
    assert_eq!(pending["dates"], vec!["StartDate", "EndDate"]);
    assert_eq!(pending["privacy"], vec!["PrivacyPolicyURL"]);
    assert!(!pending.contains_key("fraud"));

    let mut bindings = HashMap::new();
    bindings.insert("StartDate".to_string(), "1 March 2026".to_string());
    bindings.insert("EndDate".to_string(), "31 March 2026".to_string());
    let filled = fill_placeholders(&v1.clause("dates").unwrap().body, &bindings);
    assert!(filled.is_complete());
    assert!(filled.text.starts_with("The campaign opens on 1 March 2026 and closes on 31 March 2026"));
}
