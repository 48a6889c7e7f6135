//! Gemini `generateContent` client.
//!
//! Wire types and response handling are always compiled; the HTTP client needs
//! the `gemini` feature.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisError, AnalysisParseResult};
use crate::prompts::{make_analysis_prompt, SYSTEM_PROMPT};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Response body from `generateContent`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentRequest {
    /// Analysis request for one prescription.
    pub fn for_prescription(text: &str) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_PROMPT.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: make_analysis_prompt(text),
                }],
            }],
        }
    }
}

/// Endpoint URL for a model.
pub fn generate_content_url(model: &str) -> String {
    format!("{}/models/{}:generateContent", GEMINI_BASE_URL, model)
}

/// Concatenated text of the first candidate.
pub fn extract_response_text(response: &GenerateContentResponse) -> AnalysisParseResult<String> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(AnalysisError::InvalidFormat(format!(
            "Prompt blocked: {}",
            reason
        )));
    }

    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| AnalysisError::InvalidFormat("No candidates in response".into()))?;

    let text: String = candidate
        .content
        .parts
        .iter()
        .map(|p| p.text.as_str())
        .collect();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(AnalysisError::InvalidFormat(format!(
            "Empty candidate (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

#[cfg(feature = "gemini")]
pub use client::GeminiAnalyzer;

#[cfg(feature = "gemini")]
mod client {
    use std::time::Duration;

    use rx_analyzer_core::pipeline::{CollaboratorError, CollaboratorResult, TextAnalyzer};
    use rx_analyzer_core::{AnalyzerConfig, Collaborator};
    use tracing::{debug, info};

    use super::*;

    /// [`TextAnalyzer`] backed by the Gemini API.
    pub struct GeminiAnalyzer {
        client: reqwest::blocking::Client,
        api_key: String,
        model: String,
        timeout_secs: u64,
    }

    impl GeminiAnalyzer {
        /// Create from configuration. Fails if no API key is configured.
        pub fn from_config(config: &AnalyzerConfig) -> CollaboratorResult<Self> {
            let api_key = config
                .api_key
                .clone()
                .ok_or(CollaboratorError::NotConfigured(Collaborator::TextAnalyzer))?;

            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| CollaboratorError::Request(e.to_string()))?;

            let fingerprint = config.api_key_fingerprint().unwrap_or_default();
            info!(
                model = %config.model,
                key_fingerprint = %fingerprint,
                "Gemini analyzer configured"
            );

            Ok(Self {
                client,
                api_key,
                model: config.model.clone(),
                timeout_secs: config.timeout_secs,
            })
        }

        pub fn model(&self) -> &str {
            &self.model
        }
    }

    impl TextAnalyzer for GeminiAnalyzer {
        fn analyze(&self, text: &str) -> CollaboratorResult<String> {
            let url = generate_content_url(&self.model);
            let body = GenerateContentRequest::for_prescription(text);

            debug!(model = %self.model, chars = text.len(), "requesting analysis");

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .map_err(|e| {
                    if e.is_timeout() {
                        CollaboratorError::Request(format!(
                            "Request timed out after {}s",
                            self.timeout_secs
                        ))
                    } else {
                        CollaboratorError::Request(e.to_string())
                    }
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(CollaboratorError::Request(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    body.trim()
                )));
            }

            let parsed: GenerateContentResponse = response
                .json()
                .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;

            extract_response_text(&parsed)
                .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))
        }
    }
}
