//! Result assembly.
//!
//! Collaborator failures never abort assembly: a failed recognizer yields no
//! entities, a failed analyzer yields [`AiAnalysis::Unavailable`], and both leave a
//! [`CollaboratorIssue`] on the result.

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::warn;
use uuid::Uuid;

use crate::library::PatternLibrary;
use crate::links::LinkBuilder;
use crate::matcher::Standardizer;
use crate::models::{
    AiAnalysis, AnalysisResult, Collaborator, CollaboratorIssue, DosageFrequency,
    MedicalEntity, UnresolvedDrug,
};

use super::CollaboratorResult;

/// Merges matcher, extractor and collaborator outputs into an [`AnalysisResult`].
pub struct ResultAssembler<'a> {
    library: &'a PatternLibrary,
    links: LinkBuilder<'a>,
    standardizer: Standardizer<'a>,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self {
            library,
            links: LinkBuilder::new(library),
            standardizer: Standardizer::new(library),
        }
    }

    /// Assemble a result. Always returns a complete record.
    pub fn assemble(
        &self,
        text: &str,
        drugs: Vec<String>,
        dosage_frequency: DosageFrequency,
        entities: CollaboratorResult<Vec<MedicalEntity>>,
        ai_analysis: CollaboratorResult<String>,
    ) -> AnalysisResult {
        self.assemble_with_issues(text, drugs, dosage_frequency, entities, ai_analysis, Vec::new())
    }

    /// Assemble a result, keeping issues raised before assembly (e.g. by OCR).
    pub fn assemble_with_issues(
        &self,
        text: &str,
        drugs: Vec<String>,
        dosage_frequency: DosageFrequency,
        entities: CollaboratorResult<Vec<MedicalEntity>>,
        ai_analysis: CollaboratorResult<String>,
        mut issues: Vec<CollaboratorIssue>,
    ) -> AnalysisResult {
        let entities = match entities {
            Ok(entities) => entities,
            Err(e) => {
                warn!(error = %e, "entity recognition failed");
                issues.push(CollaboratorIssue {
                    collaborator: Collaborator::EntityRecognizer,
                    message: e.to_string(),
                });
                Vec::new()
            }
        };

        let ai_analysis = match ai_analysis {
            Ok(text) => AiAnalysis::Completed { text },
            Err(e) => {
                warn!(error = %e, "generative analysis failed");
                issues.push(CollaboratorIssue {
                    collaborator: Collaborator::TextAnalyzer,
                    message: e.to_string(),
                });
                AiAnalysis::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        let unresolved = drugs
            .iter()
            .filter(|drug| !self.library.is_canonical(drug))
            .map(|drug| {
                let suggestion = self.standardizer.suggest(drug);
                UnresolvedDrug {
                    name: drug.clone(),
                    similarity: suggestion.as_ref().map(|s| s.similarity),
                    suggestion: suggestion.map(|s| s.canonical),
                }
            })
            .collect();

        AnalysisResult {
            analysis_id: Uuid::new_v4().to_string(),
            analyzed_at: Utc::now().to_rfc3339(),
            text_digest: text_digest(text),
            extracted_text: text.to_string(),
            links: self.links.build_links(drugs.as_slice()),
            drugs,
            dosage_frequency,
            entities,
            ai_analysis,
            unresolved,
            issues,
        }
    }
}

/// Hex SHA-256 of the analyzed text.
pub fn text_digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
