//! Dosage and frequency extraction.

use std::collections::HashSet;

use regex::Regex;

use crate::library::PatternLibrary;
use crate::models::DosageFrequency;

/// Scans text with the library's dosage and frequency patterns.
pub struct DosageFrequencyExtractor<'a> {
    library: &'a PatternLibrary,
}

impl<'a> DosageFrequencyExtractor<'a> {
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self { library }
    }

    /// Collect every dosage and frequency match. Never fails.
    pub fn extract(&self, text: &str) -> DosageFrequency {
        DosageFrequency {
            dosages: collect_unique(self.library.dosage_patterns(), text),
            frequencies: collect_unique(self.library.frequency_patterns(), text),
        }
    }
}

/// All matches of all patterns, pattern by pattern, collapsing case-insensitive duplicates.
fn collect_unique(patterns: &[Regex], text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for pattern in patterns {
        for m in pattern.find_iter(text) {
            if seen.insert(m.as_str().to_lowercase()) {
                found.push(m.as_str().to_string());
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> DosageFrequency {
        let library = PatternLibrary::builtin().unwrap();
        DosageFrequencyExtractor::new(&library).extract(text)
    }

    #[test]
    fn test_dosage_and_frequency() {
        let found = extract("Paracetamol 500mg twice daily");
        assert_eq!(found.dosages, vec!["500mg"]);
        assert_eq!(found.frequencies, vec!["twice daily"]);
    }

    #[test]
    fn test_case_insensitive_duplicates_collapse() {
        let found = extract("500MG at night, 500mg at NIGHT");
        assert_eq!(found.dosages, vec!["500MG"]);
        assert_eq!(found.frequencies, vec!["night"]);
    }

    #[test]
    fn test_units_and_schedules() {
        let found = extract("Insulin 10 units every 8 hours, 2 tablets BID, 5 ml 3 times daily");
        assert!(found.dosages.contains(&"10 units".to_string()));
        assert!(found.dosages.contains(&"2 tablets".to_string()));
        assert!(found.dosages.contains(&"5 ml".to_string()));
        assert!(found.frequencies.contains(&"every 8 hours".to_string()));
        assert!(found.frequencies.contains(&"BID".to_string()));
        assert!(found.frequencies.contains(&"3 times daily".to_string()));
    }

    #[test]
    fn test_abbreviations_need_word_boundaries() {
        // "od" in "food", "tid" in "antidote"
        let found = extract("after food, keep antidote handy");
        assert!(found.frequencies.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let found = extract("");
        assert!(found.dosages.is_empty());
        assert!(found.frequencies.is_empty());
        assert!(found.is_empty());
    }
}
