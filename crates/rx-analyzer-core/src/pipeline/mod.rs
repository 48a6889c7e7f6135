//! Analysis pipeline.
//!
//! Pipeline: Text Source → (Drug Matcher ∥ Dosage/Frequency Extractor)
//! → Collaborators (NER, generative analysis) → Result Assembler → Links

mod assembler;
mod collaborators;

pub use assembler::*;
pub use collaborators::*;

use tracing::{info, warn};

use crate::extractor::DosageFrequencyExtractor;
use crate::library::PatternLibrary;
use crate::matcher::DrugMatcher;
use crate::models::{AnalysisResult, Collaborator, CollaboratorIssue};

/// Coordinates the full analysis of one prescription.
///
/// Collaborators are optional; a missing one is reported on the result the same
/// way a failing one is.
pub struct Analyzer<'a> {
    matcher: DrugMatcher<'a>,
    extractor: DosageFrequencyExtractor<'a>,
    assembler: ResultAssembler<'a>,
    ocr: Option<&'a dyn OcrEngine>,
    recognizer: Option<&'a dyn EntityRecognizer>,
    text_analyzer: Option<&'a dyn TextAnalyzer>,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer with no collaborators.
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self {
            matcher: DrugMatcher::new(library),
            extractor: DosageFrequencyExtractor::new(library),
            assembler: ResultAssembler::new(library),
            ocr: None,
            recognizer: None,
            text_analyzer: None,
        }
    }

    pub fn with_ocr(mut self, ocr: &'a dyn OcrEngine) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn with_entity_recognizer(mut self, recognizer: &'a dyn EntityRecognizer) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn with_text_analyzer(mut self, text_analyzer: &'a dyn TextAnalyzer) -> Self {
        self.text_analyzer = Some(text_analyzer);
        self
    }

    /// Analyze text or an image.
    ///
    /// If no text can be obtained the analysis runs on empty text and the
    /// failure is recorded as a text-source issue.
    pub fn analyze_input(&self, input: &PrescriptionInput) -> AnalysisResult {
        let mut issues = Vec::new();

        let text = match input {
            PrescriptionInput::Text(text) => text.clone(),
            PrescriptionInput::Image(bytes) => {
                let extracted = match self.ocr {
                    Some(ocr) => ocr.image_to_text(bytes),
                    None => Err(CollaboratorError::NotConfigured(Collaborator::TextSource)),
                };
                match extracted {
                    Ok(text) => text.trim().to_string(),
                    Err(e) => {
                        warn!(error = %e, "text extraction failed");
                        issues.push(CollaboratorIssue {
                            collaborator: Collaborator::TextSource,
                            message: e.to_string(),
                        });
                        String::new()
                    }
                }
            }
        };

        self.run(&text, issues)
    }

    /// Analyze prescription text.
    pub fn analyze_text(&self, text: &str) -> AnalysisResult {
        self.run(text, Vec::new())
    }

    fn run(&self, text: &str, issues: Vec<CollaboratorIssue>) -> AnalysisResult {
        let drugs = self.matcher.extract_drugs(text);
        let dosage_frequency = self.extractor.extract(text);

        let entities = match self.recognizer {
            Some(recognizer) => recognizer.recognize(text),
            None => Err(CollaboratorError::NotConfigured(Collaborator::EntityRecognizer)),
        };
        let ai_analysis = match self.text_analyzer {
            Some(analyzer) => analyzer.analyze(text),
            None => Err(CollaboratorError::NotConfigured(Collaborator::TextAnalyzer)),
        };

        let result = self.assembler.assemble_with_issues(
            text,
            drugs,
            dosage_frequency,
            entities,
            ai_analysis,
            issues,
        );

        info!(
            analysis_id = %result.analysis_id,
            drugs = result.drugs.len(),
            dosages = result.dosage_frequency.dosages.len(),
            frequencies = result.dosage_frequency.frequencies.len(),
            entities = result.entities.len(),
            issues = result.issues.len(),
            "prescription analyzed"
        );

        result
    }
}
