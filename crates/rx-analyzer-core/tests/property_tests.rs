//! Property tests for the drug matcher.

use std::collections::HashSet;
use std::sync::OnceLock;

use proptest::prelude::*;
use rx_analyzer_core::{DosageFrequencyExtractor, DrugMatcher, PatternLibrary};

/// Built-in library, compiled once for the whole suite.
fn builtin_library() -> &'static PatternLibrary {
    static LIBRARY: OnceLock<PatternLibrary> = OnceLock::new();
    LIBRARY.get_or_init(|| PatternLibrary::builtin().unwrap())
}

fn prescription_line() -> impl Strategy<Value = String> {
    let word = prop::sample::select(vec![
        "Tab", "Cap", "Syp", "Inj", "Crocin", "Dolo", "Paracetamol", "Augmentin",
        "Amoxicillin", "Omez", "Zyrtec", "Rosuvastatin", "Lipitor", "twice", "daily", "BD",
        "at", "night", "500mg", "10 mg", "5 ml", "1 g", "2 tablets", ".", ",", "\n",
    ]);
    prop::collection::vec(word, 0..24).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn drugs_are_unique(text in prescription_line()) {
        let library = builtin_library();
        let drugs = DrugMatcher::new(library).extract_drugs(&text);
        let unique: HashSet<&String> = drugs.iter().collect();
        prop_assert_eq!(unique.len(), drugs.len());
    }

    #[test]
    fn extraction_is_deterministic(text in prescription_line()) {
        let library = builtin_library();
        let matcher = DrugMatcher::new(library);
        prop_assert_eq!(matcher.extract_drugs(&text), matcher.extract_drugs(&text));
    }

    #[test]
    fn drug_names_are_lowercase(text in prescription_line()) {
        let library = builtin_library();
        for drug in DrugMatcher::new(library).extract_drugs(&text) {
            prop_assert_eq!(drug.to_lowercase(), drug.clone());
            prop_assert!(drug.chars().count() > 2);
        }
    }

    #[test]
    fn dosages_unique_ignoring_case(text in prescription_line()) {
        let library = builtin_library();
        let found = DosageFrequencyExtractor::new(library).extract(&text);
        let lowered: HashSet<String> = found.dosages.iter().map(|d| d.to_lowercase()).collect();
        prop_assert_eq!(lowered.len(), found.dosages.len());
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,200}") {
        let library = builtin_library();
        let _ = DrugMatcher::new(library).extract_drugs(&text);
        let _ = DosageFrequencyExtractor::new(library).extract(&text);
    }
}
