//! Engine configuration
//!
//! Read from the environment (a `.env` file is honoured) or from a YAML file:
//!
//! ```yaml
//! catalog_path: config/clauses.yaml   # omit to use the built-in catalog
//! log_filter: cosmohub_terms=debug
//! ```
//!
//! | Variable             | Meaning                               |
//! |----------------------|---------------------------------------|
//! | `TERMS_CATALOG_PATH` | YAML clause catalog to seed from      |
//! | `TERMS_LOG`          | `tracing` filter directive            |

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::ClauseCatalog;

pub const CATALOG_PATH_ENV: &str = "TERMS_CATALOG_PATH";
pub const LOG_FILTER_ENV: &str = "TERMS_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Alternative clause catalog; `None` means the built-in one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            log_filter: default_log_filter(),
        }
    }
}

impl EngineConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            catalog_path: get(CATALOG_PATH_ENV).map(PathBuf::from),
            log_filter: get(LOG_FILTER_ENV).unwrap_or_else(default_log_filter),
        }
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Catalog named by the config, or the built-in one.
    pub fn load_catalog(&self) -> Result<Arc<ClauseCatalog>> {
        match &self.catalog_path {
            Some(path) => {
                let catalog = ClauseCatalog::from_yaml_file(path)
                    .with_context(|| format!("Failed to load catalog {}", path.display()))?;
                tracing::info!(path = %path.display(), clauses = catalog.len(), "Loaded clause catalog");
                Ok(Arc::new(catalog))
            }
            None => Ok(ClauseCatalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (CATALOG_PATH_ENV, "/tmp/clauses.yaml"),
            (LOG_FILTER_ENV, "  "),
        ]
        .into_iter()
        .collect();

        let cfg = EngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.catalog_path, Some(PathBuf::from("/tmp/clauses.yaml")));
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_default_uses_builtin_catalog() {
        let cfg = EngineConfig::default();
        let catalog = cfg.load_catalog().unwrap();
        assert!(Arc::ptr_eq(&catalog, &ClauseCatalog::builtin()));
    }

    #[test]
    fn test_yaml_config_and_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("clauses.yaml");
        let mut f = std::fs::File::create(&catalog_path).unwrap();
        writeln!(
            f,
            "clauses:\n  - {{ key: only, title: Only, default_body: text, required: true, lock_level: editable }}"
        )
        .unwrap();

        let config_path = dir.path().join("terms.yaml");
        std::fs::write(
            &config_path,
            format!("catalog_path: {}\n", catalog_path.display()),
        )
        .unwrap();

        let cfg = EngineConfig::from_yaml_file(&config_path).unwrap();
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
        let catalog = cfg.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first_key(), "only");
    }

    #[test]
    fn test_missing_catalog_file_reports_path() {
        let cfg = EngineConfig {
            catalog_path: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..Default::default()
        };
        let err = cfg.load_catalog().unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.yaml"));
    }
}
