//! Offline entity recognizer backed by the pattern library.
//!
//! Used when no token-classification model is available. Drug terms (canonical
//! names and aliases) are labelled CHEMICAL; a small condition lexicon is
//! labelled DISEASE.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use rx_analyzer_core::pipeline::{CollaboratorResult, EntityRecognizer};
use rx_analyzer_core::{MedicalEntity, PatternLibrary};

pub const CHEMICAL_LABEL: &str = "CHEMICAL";
pub const DISEASE_LABEL: &str = "DISEASE";

/// Conditions commonly written on prescriptions.
pub const CONDITION_TERMS: &[&str] = &[
    "fever",
    "headache",
    "hypertension",
    "diabetes",
    "infection",
    "cough",
    "cold",
    "asthma",
    "acidity",
    "gastritis",
    "arthritis",
    "migraine",
    "allergy",
    "pain",
    "high cholesterol",
];

/// Lexicon match confidence; exact surface matches only.
const LEXICON_CONFIDENCE: f64 = 1.0;

/// Dictionary-based [`EntityRecognizer`].
#[derive(Debug, Clone)]
pub struct LexiconEntityRecognizer {
    regex: Option<Regex>,
    labels: HashMap<String, &'static str>,
}

impl LexiconEntityRecognizer {
    /// Build from the library's drug terms plus [`CONDITION_TERMS`].
    pub fn new(library: &PatternLibrary) -> Result<Self, regex::Error> {
        let mut labels: HashMap<String, &'static str> = HashMap::new();
        for (canonical, aliases) in library.terms() {
            labels.insert(canonical.to_string(), CHEMICAL_LABEL);
            for alias in aliases {
                labels.insert(alias.to_string(), CHEMICAL_LABEL);
            }
        }
        for term in CONDITION_TERMS {
            labels.entry(term.to_string()).or_insert(DISEASE_LABEL);
        }

        let regex = if labels.is_empty() {
            None
        } else {
            // Longest first so "high cholesterol" wins over shorter overlaps
            let mut terms: Vec<&String> = labels.keys().collect();
            terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            let alternation = terms
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(Self { regex, labels })
    }

    /// Number of known terms.
    pub fn term_count(&self) -> usize {
        self.labels.len()
    }
}

impl EntityRecognizer for LexiconEntityRecognizer {
    fn recognize(&self, text: &str) -> CollaboratorResult<Vec<MedicalEntity>> {
        let Some(regex) = &self.regex else {
            return Ok(Vec::new());
        };

        let entities = regex
            .find_iter(text)
            .filter_map(|m| {
                self.labels
                    .get(&m.as_str().to_lowercase())
                    .map(|label| MedicalEntity::new(m.as_str(), *label, LEXICON_CONFIDENCE))
            })
            .collect();

        Ok(entities)
    }
}
