//! Email candidate synthesis from person names.
//!
//! Each usable name is expanded through a fixed list of local-part patterns,
//! in a fixed order, against the caller's domain. The domain is used exactly
//! as supplied; whether it can receive mail is the domain validator's job.

use std::collections::HashSet;
use tracing::{debug, warn};

/// Local-part patterns, in expansion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailPattern {
    /// `first.last`
    FirstDotLast,
    /// `firstlast`
    FirstLast,
    /// `first_last`
    FirstUnderscoreLast,
    /// `f.last`
    InitialDotLast,
    /// `flast`
    InitialLast,
    /// `first`
    First,
}

impl EmailPattern {
    /// Every pattern, in the order candidates are produced.
    pub const ALL: [Self; 6] = [
        Self::FirstDotLast,
        Self::FirstLast,
        Self::FirstUnderscoreLast,
        Self::InitialDotLast,
        Self::InitialLast,
        Self::First,
    ];

    /// Short human-readable form of the pattern.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstDotLast => "first.last",
            Self::FirstLast => "firstlast",
            Self::FirstUnderscoreLast => "first_last",
            Self::InitialDotLast => "f.last",
            Self::InitialLast => "flast",
            Self::First => "first",
        }
    }

    /// Build the local part from already lower-cased name parts.
    ///
    /// Returns `None` when the pattern cannot be applied to these parts.
    #[must_use]
    pub fn local_part(&self, first: &str, last: &str) -> Option<String> {
        let initial = || first.chars().next();
        match self {
            Self::FirstDotLast => Some(format!("{first}.{last}")),
            Self::FirstLast => Some(format!("{first}{last}")),
            Self::FirstUnderscoreLast => Some(format!("{first}_{last}")),
            Self::InitialDotLast => initial().map(|f| format!("{f}.{last}")),
            Self::InitialLast => initial().map(|f| format!("{f}{last}")),
            Self::First => (!first.is_empty()).then(|| first.to_string()),
        }
    }
}

/// Split a full name into lower-cased (first, last) parts.
///
/// Requires at least two whitespace-separated tokens; middle tokens are
/// ignored.
#[must_use]
pub fn split_name(name: &str) -> Option<(String, String)> {
    let mut tokens = name.split_whitespace();
    let first = tokens.next()?;
    let last = tokens.last()?;
    Some((first.to_lowercase(), last.to_lowercase()))
}

/// Expand names into candidate addresses at `domain`.
///
/// Order is names first, then patterns in [`EmailPattern::ALL`] order.
/// Names with fewer than two tokens contribute nothing.
pub fn expand<S: AsRef<str>>(names: &[S], domain: &str) -> Vec<String> {
    let mut candidates = Vec::with_capacity(names.len() * EmailPattern::ALL.len());

    for name in names {
        let name = name.as_ref();
        let Some((first, last)) = split_name(name) else {
            debug!("Skipping name without first and last parts: {:?}", name);
            continue;
        };

        for pattern in EmailPattern::ALL {
            match pattern.local_part(&first, &last) {
                Some(local) => candidates.push(format!("{local}@{domain}")),
                None => warn!(
                    "Could not apply pattern {} to name {:?}",
                    pattern.label(),
                    name
                ),
            }
        }
    }

    candidates
}

/// Remove repeated addresses, keeping the first occurrence of each.
///
/// Comparison is exact and case-sensitive.
#[must_use]
pub fn dedupe(candidates: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_single_name_order() {
        let emails = expand(&["Ada Lovelace"], "example.com");
        assert_eq!(
            emails,
            vec![
                "ada.lovelace@example.com",
                "adalovelace@example.com",
                "ada_lovelace@example.com",
                "a.lovelace@example.com",
                "alovelace@example.com",
                "ada@example.com",
            ]
        );
    }

    #[test]
    fn test_single_token_name_contributes_nothing() {
        assert!(expand(&["Cher"], "example.com").is_empty());
        assert!(expand(&["   "], "example.com").is_empty());
    }

    #[test]
    fn test_empty_names() {
        let names: Vec<String> = Vec::new();
        assert!(expand(&names, "example.com").is_empty());
    }

    #[test]
    fn test_middle_names_ignored() {
        let emails = expand(&["Mary Ann  Evans"], "example.com");
        assert_eq!(emails[0], "mary.evans@example.com");
        assert!(emails.iter().all(|e| !e.contains("ann")));
    }

    #[test]
    fn test_domain_used_verbatim() {
        let emails = expand(&["Grace Hopper"], "Navy.MIL");
        assert!(emails.iter().all(|e| e.ends_with("@Navy.MIL")));
        assert_eq!(emails[0], "grace.hopper@Navy.MIL");
    }

    #[test]
    fn test_non_ascii_initial() {
        let emails = expand(&["Émile Zola"], "example.fr");
        assert_eq!(emails[3], "é.zola@example.fr");
    }

    #[test]
    fn test_dedupe_preserves_first_occurrence() {
        let deduped = dedupe(vec![
            "b@x.io".to_string(),
            "a@x.io".to_string(),
            "b@x.io".to_string(),
            "B@x.io".to_string(),
        ]);
        assert_eq!(deduped, vec!["b@x.io", "a@x.io", "B@x.io"]);
    }

    #[test]
    fn test_expand_then_dedupe_has_no_duplicates() {
        // Same first/last pair through different middle names collides
        let names = ["John Smith", "John Q Smith", "Jane Smith", "Jill Smith"];
        let emails = dedupe(expand(&names, "acme.io"));

        let unique: HashSet<&String> = emails.iter().collect();
        assert_eq!(unique.len(), emails.len());
        assert!(emails.iter().all(|e| e.ends_with("@acme.io")));
        // "j.smith" and "jsmith" appear once despite three J-names
        assert_eq!(emails.iter().filter(|e| *e == "j.smith@acme.io").count(), 1);
        assert_eq!(emails.len(), 6 + 4 + 4);
    }

    #[test]
    fn test_pattern_labels() {
        let labels: Vec<&str> = EmailPattern::ALL.iter().map(EmailPattern::label).collect();
        assert_eq!(
            labels,
            vec!["first.last", "firstlast", "first_last", "f.last", "flast", "first"]
        );
    }
}
