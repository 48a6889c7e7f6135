//! Collaborator implementations for prescription analysis.
//!
//! This crate provides the entity-recognition and generative-analysis sides of the
//! pipeline: the fixed analysis prompt, parsers for model output, an offline
//! lexicon recognizer and (with the `gemini` feature) a Gemini HTTP client.

pub mod analysis;
pub mod gemini;
pub mod ner;
pub mod prompts;
pub mod recognizer;

pub use analysis::*;
pub use gemini::*;
pub use ner::*;
pub use prompts::*;
pub use recognizer::*;
