//! Clause catalog
//!
//! The catalog is read-only reference data: one `ClauseDefinition` per
//! section of the terms document, in document order. Every document version
//! starts life as a copy of it, and "reset to default" reads from it.
//!
//! The built-in catalog is process-wide and never mutated. Alternative
//! catalogs can be loaded from YAML; they are validated once and immutable
//! afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::error::CatalogError;
use crate::types::{LockLevel, Placement};

/// Immutable template for one clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseDefinition {
    pub key: String,
    pub title: String,
    /// Default text, may contain `{Token}` placeholders.
    pub default_body: String,
    #[serde(default)]
    pub required: bool,
    pub lock_level: LockLevel,
    #[serde(default)]
    pub placements: Vec<Placement>,
}

/// Ordered, validated set of clause definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseCatalog {
    definitions: Vec<ClauseDefinition>,
}

// ── YAML format for deserialization ──

#[derive(Debug, Deserialize)]
struct ClauseCatalogYaml {
    #[serde(default)]
    clauses: Vec<ClauseDefinition>,
}

impl ClauseCatalog {
    /// Validate and build a catalog.
    ///
    /// Rejects empty catalogs, blank or duplicate keys, and clauses that are
    /// required but sit at the `optional` tier. Duplicate placements within a
    /// clause are collapsed.
    pub fn new(definitions: Vec<ClauseDefinition>) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut cleaned = Vec::with_capacity(definitions.len());
        for (index, mut def) in definitions.into_iter().enumerate() {
            if def.key.trim().is_empty() {
                return Err(CatalogError::BlankKey { index });
            }
            if !seen.insert(def.key.clone()) {
                return Err(CatalogError::DuplicateKey { key: def.key });
            }
            if def.required && def.lock_level == LockLevel::Optional {
                return Err(CatalogError::RequiredButOptional { key: def.key });
            }

            let mut placements = Vec::with_capacity(def.placements.len());
            for p in def.placements {
                if !placements.contains(&p) {
                    placements.push(p);
                }
            }
            def.placements = placements;
            cleaned.push(def);
        }

        Ok(Self {
            definitions: cleaned,
        })
    }

    /// Parse a catalog from YAML.
    ///
    /// ```yaml
    /// clauses:
    ///   - key: promoter
    ///     title: Promoter
    ///     default_body: "The promoter of this campaign is {PromoterName}."
    ///     required: true
    ///     lock_level: editable
    ///     placements: ["T&Cs"]
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let raw: ClauseCatalogYaml = serde_yaml::from_str(yaml)?;
        Self::new(raw.clauses)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Shared handle to the built-in catalog.
    pub fn builtin() -> Arc<ClauseCatalog> {
        Arc::clone(&BUILTIN_CATALOG)
    }

    pub fn get(&self, key: &str) -> Option<&ClauseDefinition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn definitions(&self) -> &[ClauseDefinition] {
        &self.definitions
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClauseDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Key of the first clause in document order.
    pub fn first_key(&self) -> &str {
        // `new` guarantees at least one definition
        &self.definitions[0].key
    }
}

// ---------------------------------------------------------------------------
// Built-in catalog
// ---------------------------------------------------------------------------

static BUILTIN_CATALOG: LazyLock<Arc<ClauseCatalog>> = LazyLock::new(|| {
    Arc::new(ClauseCatalog {
        definitions: default_definitions(),
    })
});

fn def(
    key: &str,
    title: &str,
    required: bool,
    lock_level: LockLevel,
    placements: &[Placement],
    default_body: &str,
) -> ClauseDefinition {
    ClauseDefinition {
        key: key.to_string(),
        title: title.to_string(),
        default_body: default_body.to_string(),
        required,
        lock_level,
        placements: placements.to_vec(),
    }
}

/// The product's standard promotional-campaign clauses, in document order.
fn default_definitions() -> Vec<ClauseDefinition> {
    use LockLevel::{Editable, Locked, Optional};
    use Placement::{Entry, FullTerms, Public};

    vec![
        def(
            "promoter",
            "Promoter",
            true,
            Editable,
            &[FullTerms],
            "The promoter of this campaign is {PromoterName} (the “Promoter”).",
        ),
        def(
            "eligibility",
            "Eligibility",
            true,
            Editable,
            &[Entry, Public, FullTerms],
            "Entry is open to UK residents aged 18+. Employees of the Promoter and their \
             immediate families are excluded.",
        ),
        def(
            "how_to_enter",
            "How to enter",
            true,
            Editable,
            &[Entry, FullTerms],
            "Purchase a participating product and submit a valid claim via the campaign page \
             during the campaign period. Limit: 1 entry per person unless otherwise stated.",
        ),
        def(
            "dates",
            "Campaign dates",
            true,
            Editable,
            &[Entry, Public, FullTerms],
            "The campaign opens on {StartDate} and closes on {EndDate} (Europe/London). Claims \
             received outside this period will not be accepted.",
        ),
        def(
            "prize_details",
            "Reward / prize details",
            true,
            Editable,
            &[Public, FullTerms],
            "Instant rewards: {InstantRewardDescription}. Prize draw: {PrizeDrawDescription}. \
             No alternative is available unless stated otherwise.",
        ),
        def(
            "winner_selection",
            "Winner selection & notification",
            true,
            Editable,
            &[FullTerms],
            "Where a prize draw applies, winners will be selected at random from valid entries \
             received during the campaign period. Winners will be notified within {NotifyDays} \
             days and must claim within {ClaimWindowDays} days.",
        ),
        def(
            "cap_limits",
            "Caps & limits",
            false,
            Optional,
            &[Entry, Public, FullTerms],
            "Where rewards are capped, claims are valid while stocks last. The Promoter reserves \
             the right to end rewards early once the cap is reached.",
        ),
        def(
            "fraud",
            "Fraud & disqualification",
            true,
            Editable,
            &[FullTerms],
            "The Promoter may disqualify any entry that appears to be fraudulent, duplicated, or \
             otherwise not compliant with these Terms.",
        ),
        def(
            "privacy",
            "Privacy & data",
            true,
            Locked,
            &[Entry, FullTerms],
            "Personal data will be processed in accordance with the Promoter’s Privacy Policy. \
             Data will be used to administer the campaign and for fraud prevention. See: \
             {PrivacyPolicyURL}.",
        ),
        def(
            "liability",
            "Liability",
            true,
            Locked,
            &[FullTerms],
            "Nothing in these Terms limits the Promoter’s liability for death or personal injury \
             caused by negligence, fraud, or any liability that cannot be excluded by law.",
        ),
        def(
            "governing_law",
            "Governing law",
            false,
            Optional,
            &[FullTerms],
            "These Terms are governed by the laws of England and Wales and the courts of England \
             and Wales shall have exclusive jurisdiction.",
        ),
    ]
}
