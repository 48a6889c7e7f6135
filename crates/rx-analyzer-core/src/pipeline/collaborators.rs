//! Contracts for the external collaborators (OCR, NER, generative analysis).

use thiserror::Error;

use crate::models::{Collaborator, MedicalEntity};

/// Collaborator errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("{0} is not configured")]
    NotConfigured(Collaborator),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported input: {0}")]
    Unsupported(String),
}

pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Raw prescription input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrescriptionInput {
    /// Typed or pasted text
    Text(String),
    /// Encoded image bytes (png, jpeg, ...)
    Image(Vec<u8>),
}

/// Turns a prescription image into text.
pub trait OcrEngine: Send + Sync {
    fn image_to_text(&self, image: &[u8]) -> CollaboratorResult<String>;
}

/// Finds medical entities in text.
///
/// Implementations return only entities whose label is in
/// [`MEDICAL_LABELS`](crate::models::MEDICAL_LABELS).
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> CollaboratorResult<Vec<MedicalEntity>>;
}

/// Produces a free-text analysis of a prescription.
pub trait TextAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> CollaboratorResult<String>;
}
