//! Analysis result models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EcommerceLink, MedicalEntity};

/// Dosage and frequency strings found in a prescription.
///
/// Both lists hold unique values (compared case-insensitively) in first-seen order.
/// A dosage is not linked to any particular drug or frequency.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DosageFrequency {
    pub dosages: Vec<String>,
    pub frequencies: Vec<String>,
}

impl DosageFrequency {
    pub fn is_empty(&self) -> bool {
        self.dosages.is_empty() && self.frequencies.is_empty()
    }
}

/// Outcome of the generative-analysis collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AiAnalysis {
    /// Analysis text returned by the collaborator
    Completed { text: String },
    /// Collaborator missing or failed
    Unavailable { reason: String },
}

impl AiAnalysis {
    /// Success hint for the presentation layer.
    pub fn is_success(&self) -> bool {
        matches!(self, AiAnalysis::Completed { .. })
    }

    /// Text to show in place of the analysis.
    pub fn display_text(&self) -> String {
        match self {
            AiAnalysis::Completed { text } => text.clone(),
            AiAnalysis::Unavailable { reason } => format!("AI analysis unavailable: {}", reason),
        }
    }
}

/// External collaborators the pipeline depends on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Collaborator {
    /// OCR engine or direct text input
    TextSource,
    /// Medical named-entity recognizer
    EntityRecognizer,
    /// Generative text analysis
    TextAnalyzer,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collaborator::TextSource => "text source",
            Collaborator::EntityRecognizer => "entity recognizer",
            Collaborator::TextAnalyzer => "text analyzer",
        };
        f.write_str(name)
    }
}

/// A collaborator failure that was absorbed into the result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollaboratorIssue {
    pub collaborator: Collaborator,
    pub message: String,
}

/// A drug name that matched no synonym table entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnresolvedDrug {
    /// Name as it appears in [`AnalysisResult::drugs`]
    pub name: String,
    /// Closest canonical name, if similar enough to be worth showing
    pub suggestion: Option<String>,
    /// Similarity of the suggestion (0.0 - 1.0)
    pub similarity: Option<f64>,
}

/// Everything known about one prescription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// Unique id for this analysis run
    pub analysis_id: String,
    /// Analysis timestamp (RFC 3339)
    pub analyzed_at: String,
    /// Hex SHA-256 of `extracted_text`
    pub text_digest: String,
    /// Text the analysis ran on
    pub extracted_text: String,
    /// Canonical drug names, unique, first-seen order
    pub drugs: Vec<String>,
    /// Dosages and frequencies
    pub dosage_frequency: DosageFrequency,
    /// Entities from the recognizer (empty on failure)
    pub entities: Vec<MedicalEntity>,
    /// Generative analysis outcome
    pub ai_analysis: AiAnalysis,
    /// Drug → purchase links in site order
    pub links: BTreeMap<String, Vec<EcommerceLink>>,
    /// Drugs that passed through unstandardized
    pub unresolved: Vec<UnresolvedDrug>,
    /// Collaborator failures absorbed during the run
    pub issues: Vec<CollaboratorIssue>,
}

impl AnalysisResult {
    pub fn has_drugs(&self) -> bool {
        !self.drugs.is_empty()
    }

    /// Purchase links for one drug.
    pub fn links_for(&self, drug: &str) -> &[EcommerceLink] {
        self.links.get(drug).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Issues reported by one collaborator.
    pub fn issues_for(&self, collaborator: Collaborator) -> impl Iterator<Item = &CollaboratorIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.collaborator == collaborator)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
