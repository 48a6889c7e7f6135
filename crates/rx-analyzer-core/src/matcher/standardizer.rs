//! Drug name standardization against the synonym table.
//!
//! Resolution order:
//! 1. Exact canonical name
//! 2. Exact alias
//! 3. Substring match either way against a canonical name or alias
//! 4. Pass-through (unchanged)
//!
//! Steps 2 and 3 walk the table in sorted canonical order; the first hit wins.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::library::PatternLibrary;

/// Minimum Jaro-Winkler similarity for a suggestion.
pub const SUGGESTION_THRESHOLD: f64 = 0.85;

/// How a candidate was mapped to its final name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Candidate is a canonical name
    Canonical,
    /// Candidate is a known alias
    Alias,
    /// Candidate contains, or is contained by, a known term
    Partial,
    /// No table entry matched
    PassThrough,
}

/// Closest canonical name for an unresolved drug.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub canonical: String,
    pub similarity: f64,
}

/// Standardizes drug names using the library's synonym table.
pub struct Standardizer<'a> {
    library: &'a PatternLibrary,
}

impl<'a> Standardizer<'a> {
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self { library }
    }

    /// Resolve a candidate to its canonical name.
    pub fn standardize(&self, candidate: &str) -> (String, Resolution) {
        let lower = candidate.trim().to_lowercase();

        if self.library.is_canonical(&lower) {
            return (lower, Resolution::Canonical);
        }

        if let Some(canonical) = self.library.canonical_for_alias(&lower) {
            return (canonical.to_string(), Resolution::Alias);
        }

        if !lower.is_empty() {
            for (canonical, terms) in self.library.terms() {
                let hit = terms
                    .iter()
                    .any(|term| lower.contains(term) || term.contains(lower.as_str()));
                if hit {
                    return (canonical.to_string(), Resolution::Partial);
                }
            }
        }

        (lower, Resolution::PassThrough)
    }

    /// Closest canonical name by Jaro-Winkler similarity over names and aliases.
    pub fn suggest(&self, name: &str) -> Option<Suggestion> {
        let lower = name.trim().to_lowercase();
        let mut best: Option<Suggestion> = None;

        for (canonical, terms) in self.library.terms() {
            for term in terms {
                let similarity = jaro_winkler(&lower, term);
                let better = best
                    .as_ref()
                    .map(|b| similarity > b.similarity)
                    .unwrap_or(true);
                if similarity >= SUGGESTION_THRESHOLD && better {
                    best = Some(Suggestion {
                        canonical: canonical.to_string(),
                        similarity,
                    });
                }
            }
        }

        best
    }
}
