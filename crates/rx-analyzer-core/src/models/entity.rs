//! Medical entities reported by the entity recognizer.

use serde::{Deserialize, Serialize};

/// Entity labels kept from recognizer output.
pub const MEDICAL_LABELS: [&str; 3] = ["CHEMICAL", "DISEASE", "GENE_OR_GENE_PRODUCT"];

/// A recognized medical entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalEntity {
    /// Surface text
    pub text: String,
    /// Entity group (CHEMICAL, DISEASE, ...)
    pub label: String,
    /// Recognizer score (0.0 - 1.0)
    pub confidence: f64,
}

impl MedicalEntity {
    pub fn new(text: impl Into<String>, label: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            confidence,
        }
    }

    /// Check if the label is one of [`MEDICAL_LABELS`].
    pub fn is_medical(&self) -> bool {
        MEDICAL_LABELS
            .iter()
            .any(|label| label.eq_ignore_ascii_case(&self.label))
    }
}
