//! Placeholder tokens in clause bodies
//!
//! Catalog defaults carry `{Token}` placeholders (`{StartDate}`,
//! `{PromoterName}`, ...) that the campaign owner is expected to replace.
//! This module finds them and performs plain text substitution. It does not
//! render documents.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// `{Identifier}`: a letter followed by letters, digits or underscores.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z][A-Za-z0-9_]*)\}").unwrap());

/// Token names in `body`, in order of first appearance, without duplicates.
pub fn placeholders(body: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(body) {
        let name = &caps[1];
        if !seen.iter().any(|s: &String| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

/// Result of filling placeholders in a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillResult {
    /// Body with every bound token substituted
    pub text: String,
    /// Tokens that were substituted
    pub filled: Vec<String>,
    /// Tokens left in place because no binding was supplied
    pub missing: Vec<String>,
}

impl FillResult {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Substitute `{Token}` occurrences that have a binding; leave the rest.
pub fn fill_placeholders(body: &str, bindings: &HashMap<String, String>) -> FillResult {
    let mut filled = Vec::new();
    let mut missing = Vec::new();

    for name in placeholders(body) {
        if bindings.contains_key(&name) {
            filled.push(name);
        } else {
            missing.push(name);
        }
    }

    let text = PLACEHOLDER_RE
        .replace_all(body, |caps: &regex::Captures<'_>| {
            bindings
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    FillResult {
        text,
        filled,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_in_order_dedup() {
        let body = "Opens {StartDate}, closes {EndDate}; reminder: {StartDate}.";
        assert_eq!(placeholders(body), vec!["StartDate", "EndDate"]);
    }

    #[test]
    fn test_placeholders_ignores_non_identifiers() {
        assert!(placeholders("{} { Spaced } {1abc} plain").is_empty());
        assert_eq!(placeholders("{Notify_Days2}"), vec!["Notify_Days2"]);
    }

    #[test]
    fn test_fill_partial() {
        let mut bindings = HashMap::new();
        bindings.insert("StartDate".to_string(), "1 March 2026".to_string());

        let result = fill_placeholders("From {StartDate} to {EndDate}.", &bindings);
        assert_eq!(result.text, "From 1 March 2026 to {EndDate}.");
        assert_eq!(result.filled, vec!["StartDate"]);
        assert_eq!(result.missing, vec!["EndDate"]);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_fill_complete_repeats() {
        let mut bindings = HashMap::new();
        bindings.insert("Name".to_string(), "Acme".to_string());

        let result = fill_placeholders("{Name} and {Name}", &bindings);
        assert_eq!(result.text, "Acme and Acme");
        assert!(result.is_complete());
    }
}
