//! Structured analysis parsed from generative model output.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Model output parsing errors.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

pub type AnalysisParseResult<T> = Result<T, AnalysisError>;

/// Analysis sections returned by the model.
///
/// Models rarely agree on key names or value shapes, so every section accepts a
/// few aliases and either a list, a single string or objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StructuredAnalysis {
    #[serde(alias = "medication", alias = "drugs", deserialize_with = "flexible_list")]
    pub medications: Vec<String>,

    #[serde(
        alias = "dosage",
        alias = "dosages_and_frequencies",
        deserialize_with = "flexible_list"
    )]
    pub dosages: Vec<String>,

    #[serde(
        alias = "interactions",
        alias = "drug_interactions",
        deserialize_with = "flexible_list"
    )]
    pub warnings: Vec<String>,

    #[serde(alias = "medical_conditions", deserialize_with = "flexible_list")]
    pub conditions: Vec<String>,

    #[serde(
        alias = "doctor_instructions",
        alias = "doctors_instructions",
        deserialize_with = "flexible_list"
    )]
    pub instructions: Vec<String>,
}

impl StructuredAnalysis {
    /// Check if every section is empty.
    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
            && self.dosages.is_empty()
            && self.warnings.is_empty()
            && self.conditions.is_empty()
            && self.instructions.is_empty()
    }

    /// Sections with a display title, in prompt order.
    pub fn sections(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Medications", self.medications.as_slice()),
            ("Dosages and frequencies", self.dosages.as_slice()),
            ("Warnings", self.warnings.as_slice()),
            ("Conditions", self.conditions.as_slice()),
            ("Instructions", self.instructions.as_slice()),
        ]
    }
}

fn flexible_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().filter_map(value_to_text).collect(),
        other => value_to_text(other).into_iter().collect(),
    })
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        }
        other => Some(other.to_string()),
    }
}

/// Parse model output into a [`StructuredAnalysis`].
///
/// Models often wrap the JSON in prose or a fenced code block; the outermost
/// object is used.
pub fn parse_structured_analysis(text: &str) -> AnalysisParseResult<StructuredAnalysis> {
    let json_start = text.find('{').ok_or_else(|| {
        AnalysisError::InvalidFormat("No JSON object found in response".into())
    })?;
    let json_end = text.rfind('}').ok_or_else(|| {
        AnalysisError::InvalidFormat("No closing brace found in response".into())
    })?;
    if json_end < json_start {
        return Err(AnalysisError::InvalidFormat(
            "Closing brace precedes opening brace".into(),
        ));
    }

    let analysis: StructuredAnalysis = serde_json::from_str(&text[json_start..=json_end])?;
    Ok(analysis)
}
