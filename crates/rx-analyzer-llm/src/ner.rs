//! Entity recognizer output handling.
//!
//! Token-classification models report entities as
//! `[{"entity_group": "CHEMICAL", "word": "aspirin", "score": 0.99, ...}]`.

use rx_analyzer_core::pipeline::{CollaboratorError, CollaboratorResult, EntityRecognizer};
use rx_analyzer_core::MedicalEntity;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{AnalysisError, AnalysisParseResult};

/// A raw entity as reported by a token-classification model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawNerEntity {
    #[serde(alias = "entity", alias = "label")]
    pub entity_group: String,
    #[serde(alias = "text")]
    pub word: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}

/// Parse recognizer output JSON into raw entities.
pub fn parse_ner_output(json: &str) -> AnalysisParseResult<Vec<RawNerEntity>> {
    // Tolerate log lines or prose around the array
    let json_start = json
        .find('[')
        .ok_or_else(|| AnalysisError::InvalidFormat("No JSON array found in output".into()))?;
    let json_end = json.rfind(']').ok_or_else(|| {
        AnalysisError::InvalidFormat("No closing bracket found in output".into())
    })?;
    if json_end < json_start {
        return Err(AnalysisError::InvalidFormat(
            "Closing bracket precedes opening bracket".into(),
        ));
    }

    let entities: Vec<RawNerEntity> = serde_json::from_str(&json[json_start..=json_end])?;
    Ok(entities)
}

/// Keep medical entities only, converting them to the core model.
///
/// Sub-word pieces (`##cillin`) are trimmed of their continuation marker.
pub fn to_medical_entities(raw: &[RawNerEntity]) -> Vec<MedicalEntity> {
    raw.iter()
        .map(|e| {
            MedicalEntity::new(
                e.word.trim_start_matches("##").trim(),
                e.entity_group.to_uppercase(),
                e.score,
            )
        })
        .filter(|e| e.is_medical() && !e.text.is_empty())
        .collect()
}

/// [`EntityRecognizer`] over output already produced by a token-classification
/// model, e.g. a JSON file written by an external NER run.
#[derive(Debug, Clone)]
pub struct TokenClassificationRecognizer {
    output: String,
}

impl TokenClassificationRecognizer {
    pub fn from_output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

impl EntityRecognizer for TokenClassificationRecognizer {
    fn recognize(&self, _text: &str) -> CollaboratorResult<Vec<MedicalEntity>> {
        let raw = parse_ner_output(&self.output)
            .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;
        let entities = to_medical_entities(&raw);
        debug!(
            raw = raw.len(),
            medical = entities.len(),
            "token classification output filtered"
        );
        Ok(entities)
    }
}
