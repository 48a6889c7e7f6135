//! Rx-Analyzer Core Library
//!
//! Prescription text analysis: drug-name matching, dosage/frequency extraction and
//! partner pharmacy links.
//!
//! # Architecture
//!
//! ```text
//! Image ──OCR──┐
//!              ▼
//! Text ──► RawText ──┬──► Drug Matcher ──────────────┐
//!                    │    (families → synonyms)      │
//!                    ├──► Dosage/Frequency Extractor ┤
//!                    ├──► Entity Recognizer (ext.) ──┤
//!                    └──► Text Analyzer (ext.) ──────┤
//!                                                    ▼
//!                                           Result Assembler
//!                                                    │
//!                                               Link Builder
//!                                                    │
//!                                                    ▼
//!                                             AnalysisResult
//! ```
//!
//! # Core Principle
//!
//! **An analysis always completes.** Collaborator failures are recorded on the
//! result, never raised.
//!
//! # Modules
//!
//! - [`library`]: Pattern library (dosage/frequency patterns, synonyms, sites)
//! - [`matcher`]: Drug matcher (pattern families + standardizer)
//! - [`extractor`]: Dosage/frequency extractor
//! - [`links`]: Partner-site link builder
//! - [`pipeline`]: Collaborator contracts, result assembler, analyzer
//! - [`models`]: Domain types (AnalysisResult, MedicalEntity, EcommerceLink, etc.)
//! - [`config`]: Environment configuration

pub mod config;
pub mod extractor;
pub mod library;
pub mod links;
pub mod matcher;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use config::AnalyzerConfig;
pub use extractor::DosageFrequencyExtractor;
pub use library::{LibraryTables, PatternLibrary};
pub use links::LinkBuilder;
pub use matcher::DrugMatcher;
pub use models::{
    AiAnalysis, AnalysisResult, Collaborator, CollaboratorIssue, DosageFrequency,
    EcommerceLink, MedicalEntity, PartnerSite, UnresolvedDrug,
};
pub use pipeline::{
    Analyzer, CollaboratorError, EntityRecognizer, OcrEngine, PrescriptionInput,
    ResultAssembler, TextAnalyzer,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum RxAnalyzerError {
    #[error("Invalid tables: {0}")]
    InvalidTables(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<library::LibraryError> for RxAnalyzerError {
    fn from(e: library::LibraryError) -> Self {
        RxAnalyzerError::InvalidTables(e.to_string())
    }
}

impl From<config::ConfigError> for RxAnalyzerError {
    fn from(e: config::ConfigError) -> Self {
        RxAnalyzerError::Configuration(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an analyzer with the built-in tables.
#[uniffi::export]
pub fn open_default_analyzer() -> Result<Arc<RxAnalyzerCore>, RxAnalyzerError> {
    let library = PatternLibrary::builtin()?;
    Ok(Arc::new(RxAnalyzerCore {
        library: Arc::new(library),
    }))
}

/// Create an analyzer from a JSON tables document.
#[uniffi::export]
pub fn open_analyzer_with_tables(json: String) -> Result<Arc<RxAnalyzerCore>, RxAnalyzerError> {
    let library = LibraryTables::from_json(&json)?.compile()?;
    Ok(Arc::new(RxAnalyzerCore {
        library: Arc::new(library),
    }))
}

/// Create an analyzer from environment configuration.
#[uniffi::export]
pub fn open_analyzer_from_env() -> Result<Arc<RxAnalyzerCore>, RxAnalyzerError> {
    let config = AnalyzerConfig::from_env()?;
    let library = config.build_library()?;
    Ok(Arc::new(RxAnalyzerCore {
        library: Arc::new(library),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Shared, read-only analyzer for FFI hosts.
///
/// The host owns OCR, entity recognition and generative analysis and passes
/// their outputs into [`RxAnalyzerCore::analyze`].
#[derive(Debug, uniffi::Object)]
pub struct RxAnalyzerCore {
    library: Arc<PatternLibrary>,
}

#[uniffi::export]
impl RxAnalyzerCore {
    /// Canonical drug names found in text.
    pub fn extract_drugs(&self, text: String) -> Vec<String> {
        DrugMatcher::new(&self.library).extract_drugs(&text)
    }

    /// Dosages and frequencies found in text.
    pub fn extract_dosage_frequency(&self, text: String) -> FfiDosageFrequency {
        DosageFrequencyExtractor::new(&self.library)
            .extract(&text)
            .into()
    }

    /// Purchase links per drug.
    pub fn build_links(&self, drugs: Vec<String>) -> HashMap<String, Vec<FfiEcommerceLink>> {
        LinkBuilder::new(&self.library)
            .build_links(drugs.as_slice())
            .into_iter()
            .map(|(drug, links)| (drug, links.into_iter().map(Into::into).collect()))
            .collect()
    }

    /// Run a full analysis using host-supplied collaborator outputs.
    ///
    /// `ai_analysis` is the analysis text on success; when it is absent,
    /// `ai_error` explains why.
    pub fn analyze(
        &self,
        text: String,
        entities: Vec<FfiMedicalEntity>,
        ai_analysis: Option<String>,
        ai_error: Option<String>,
    ) -> FfiAnalysisResult {
        let assembler = ResultAssembler::new(&self.library);
        let drugs = DrugMatcher::new(&self.library).extract_drugs(&text);
        let dosage_frequency = DosageFrequencyExtractor::new(&self.library).extract(&text);

        let ai_analysis = match (ai_analysis, ai_error) {
            (Some(analysis), _) => Ok(analysis),
            (None, Some(error)) => Err(CollaboratorError::Request(error)),
            (None, None) => Err(CollaboratorError::NotConfigured(Collaborator::TextAnalyzer)),
        };
        let entities = entities
            .into_iter()
            .map(MedicalEntity::from)
            .filter(MedicalEntity::is_medical)
            .collect();

        assembler
            .assemble(&text, drugs, dosage_frequency, Ok(entities), ai_analysis)
            .into()
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe dosage/frequency sets.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDosageFrequency {
    pub dosages: Vec<String>,
    pub frequencies: Vec<String>,
}

impl From<DosageFrequency> for FfiDosageFrequency {
    fn from(found: DosageFrequency) -> Self {
        Self {
            dosages: found.dosages,
            frequencies: found.frequencies,
        }
    }
}

/// FFI-safe purchase link.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEcommerceLink {
    pub site_name: String,
    pub url: String,
}

impl From<EcommerceLink> for FfiEcommerceLink {
    fn from(link: EcommerceLink) -> Self {
        Self {
            site_name: link.site_name,
            url: link.url,
        }
    }
}

/// FFI-safe medical entity.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicalEntity {
    pub text: String,
    pub label: String,
    pub confidence: f64,
}

impl From<FfiMedicalEntity> for MedicalEntity {
    fn from(entity: FfiMedicalEntity) -> Self {
        MedicalEntity::new(entity.text, entity.label, entity.confidence)
    }
}

impl From<MedicalEntity> for FfiMedicalEntity {
    fn from(entity: MedicalEntity) -> Self {
        Self {
            text: entity.text,
            label: entity.label,
            confidence: entity.confidence,
        }
    }
}

/// FFI-safe unresolved drug.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUnresolvedDrug {
    pub name: String,
    pub suggestion: Option<String>,
    pub similarity: Option<f64>,
}

impl From<UnresolvedDrug> for FfiUnresolvedDrug {
    fn from(drug: UnresolvedDrug) -> Self {
        Self {
            name: drug.name,
            suggestion: drug.suggestion,
            similarity: drug.similarity,
        }
    }
}

/// FFI-safe analysis result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnalysisResult {
    pub analysis_id: String,
    pub analyzed_at: String,
    pub text_digest: String,
    pub extracted_text: String,
    pub drugs: Vec<String>,
    pub dosages: Vec<String>,
    pub frequencies: Vec<String>,
    pub entities: Vec<FfiMedicalEntity>,
    pub ai_analysis_ok: bool,
    pub ai_analysis_text: String,
    pub links: HashMap<String, Vec<FfiEcommerceLink>>,
    pub unresolved: Vec<FfiUnresolvedDrug>,
    pub issues: Vec<String>,
}

impl From<AnalysisResult> for FfiAnalysisResult {
    fn from(result: AnalysisResult) -> Self {
        Self {
            ai_analysis_ok: result.ai_analysis.is_success(),
            ai_analysis_text: result.ai_analysis.display_text(),
            analysis_id: result.analysis_id,
            analyzed_at: result.analyzed_at,
            text_digest: result.text_digest,
            extracted_text: result.extracted_text,
            drugs: result.drugs,
            dosages: result.dosage_frequency.dosages,
            frequencies: result.dosage_frequency.frequencies,
            entities: result.entities.into_iter().map(Into::into).collect(),
            links: result
                .links
                .into_iter()
                .map(|(drug, links)| (drug, links.into_iter().map(Into::into).collect()))
                .collect(),
            unresolved: result.unresolved.into_iter().map(Into::into).collect(),
            issues: result
                .issues
                .into_iter()
                .map(|issue| format!("{}: {}", issue.collaborator, issue.message))
                .collect(),
        }
    }
}
