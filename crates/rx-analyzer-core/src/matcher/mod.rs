//! Drug matcher.
//!
//! Pipeline: Pattern Families → Candidate Tokens → Standardization → Dedup

mod candidates;
mod standardizer;

pub use candidates::*;
pub use standardizer::*;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::library::{FamilyKind, PatternLibrary};

/// A drug found in prescription text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchedDrug {
    /// Canonical name, or the candidate itself if unresolved
    pub name: String,
    /// Candidate token that produced the first sighting
    pub candidate: String,
    /// Family that produced the candidate
    pub family: FamilyKind,
    /// How the candidate was resolved
    pub resolution: Resolution,
}

/// Extracts and standardizes drug names.
pub struct DrugMatcher<'a> {
    library: &'a PatternLibrary,
    standardizer: Standardizer<'a>,
}

impl<'a> DrugMatcher<'a> {
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self {
            library,
            standardizer: Standardizer::new(library),
        }
    }

    /// Canonical drug names in first-seen order, without duplicates.
    pub fn extract_drugs(&self, text: &str) -> Vec<String> {
        self.match_drugs(text).into_iter().map(|m| m.name).collect()
    }

    /// Like [`extract_drugs`](Self::extract_drugs), keeping how each name was found.
    pub fn match_drugs(&self, text: &str) -> Vec<MatchedDrug> {
        let mut seen = HashSet::new();
        let mut matched = Vec::new();

        for candidate in collect_candidates(self.library.families(), text) {
            let (name, resolution) = self.standardizer.standardize(&candidate.text);
            debug!(
                candidate = %candidate.text,
                family = ?candidate.family,
                resolved = %name,
                ?resolution,
                "drug candidate"
            );

            if seen.insert(name.clone()) {
                matched.push(MatchedDrug {
                    name,
                    candidate: candidate.text,
                    family: candidate.family,
                    resolution,
                });
            }
        }

        matched
    }

    /// Get the standardizer for direct access.
    pub fn standardizer(&self) -> &Standardizer<'a> {
        &self.standardizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_paracetamol() {
        let library = PatternLibrary::builtin().unwrap();
        let matcher = DrugMatcher::new(&library);
        let drugs = matcher.extract_drugs("Paracetamol 500mg twice daily");
        assert_eq!(drugs, vec!["paracetamol"]);
    }

    #[test]
    fn test_aliases_collapse_to_one_name() {
        let library = PatternLibrary::builtin().unwrap();
        let matcher = DrugMatcher::new(&library);
        let drugs = matcher.extract_drugs("Tab Crocin 650 mg\nTab Dolo 650 mg\nParacetamol 500 mg");
        assert_eq!(drugs, vec!["paracetamol"]);
    }

    #[test]
    fn test_match_drugs_records_resolution() {
        let library = PatternLibrary::builtin().unwrap();
        let matcher = DrugMatcher::new(&library);
        let matched = matcher.match_drugs("Cap Augmentin 625mg, Zyrtec 10 mg");

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].name, "amoxicillin");
        assert_eq!(matched[0].candidate, "augmentin");
        assert_eq!(matched[0].family, FamilyKind::DosageFormPrefix);
        assert_eq!(matched[0].resolution, Resolution::Alias);

        assert_eq!(matched[1].name, "zyrtec");
        assert_eq!(matched[1].resolution, Resolution::PassThrough);
    }

    #[test]
    fn test_empty_text() {
        let library = PatternLibrary::builtin().unwrap();
        let matcher = DrugMatcher::new(&library);
        assert!(matcher.extract_drugs("").is_empty());
    }
}
