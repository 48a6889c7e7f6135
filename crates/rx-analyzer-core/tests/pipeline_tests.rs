//! End-to-end analyzer tests with stub collaborators.

use rx_analyzer_core::pipeline::CollaboratorResult;
use rx_analyzer_core::{
    AiAnalysis, Analyzer, Collaborator, CollaboratorError, EntityRecognizer, MedicalEntity,
    OcrEngine, PatternLibrary, PrescriptionInput, TextAnalyzer,
};

struct FailingOcr;

impl OcrEngine for FailingOcr {
    fn image_to_text(&self, _image: &[u8]) -> CollaboratorResult<String> {
        Err(CollaboratorError::InvalidResponse("image could not be decoded".into()))
    }
}

struct StaticRecognizer;

impl EntityRecognizer for StaticRecognizer {
    fn recognize(&self, text: &str) -> CollaboratorResult<Vec<MedicalEntity>> {
        if text.to_lowercase().contains("paracetamol") {
            Ok(vec![MedicalEntity::new("Paracetamol", "CHEMICAL", 0.98)])
        } else {
            Ok(Vec::new())
        }
    }
}

struct FailingRecognizer;

impl EntityRecognizer for FailingRecognizer {
    fn recognize(&self, _text: &str) -> CollaboratorResult<Vec<MedicalEntity>> {
        Err(CollaboratorError::Request("model not loaded".into()))
    }
}

/// Returns analysis text that mentions the word "error" on success.
struct WordyAnalyzer;

impl TextAnalyzer for WordyAnalyzer {
    fn analyze(&self, _text: &str) -> CollaboratorResult<String> {
        Ok("No dosing error detected. Take after meals.".into())
    }
}

struct FailingAnalyzer;

impl TextAnalyzer for FailingAnalyzer {
    fn analyze(&self, _text: &str) -> CollaboratorResult<String> {
        Err(CollaboratorError::Request("HTTP 429 Too Many Requests".into()))
    }
}

#[test]
fn test_full_analysis() {
    let library = PatternLibrary::builtin().unwrap();
    let analyzer = Analyzer::new(&library)
        .with_entity_recognizer(&StaticRecognizer)
        .with_text_analyzer(&WordyAnalyzer);

    let result = analyzer.analyze_text("Paracetamol 500mg twice daily");

    assert_eq!(result.extracted_text, "Paracetamol 500mg twice daily");
    assert_eq!(result.drugs, vec!["paracetamol"]);
    assert_eq!(result.dosage_frequency.dosages, vec!["500mg"]);
    assert_eq!(result.dosage_frequency.frequencies, vec!["twice daily"]);
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.links_for("paracetamol").len(), 4);
    assert!(result.unresolved.is_empty());
    assert!(result.issues.is_empty());

    // Success is typed, so "error" in the text does not flip it
    assert!(result.ai_analysis.is_success());
}

#[test]
fn test_partial_failure_keeps_everything_else() {
    let library = PatternLibrary::builtin().unwrap();
    let analyzer = Analyzer::new(&library)
        .with_entity_recognizer(&FailingRecognizer)
        .with_text_analyzer(&FailingAnalyzer);

    let result = analyzer.analyze_text("Tab Augmentin 625mg twice daily");

    assert_eq!(result.drugs, vec!["amoxicillin"]);
    assert_eq!(result.dosage_frequency.dosages, vec!["625mg"]);
    assert_eq!(result.dosage_frequency.frequencies, vec!["twice daily"]);
    assert_eq!(result.links_for("amoxicillin").len(), 4);
    assert!(result.entities.is_empty());
    assert_eq!(
        result.ai_analysis,
        AiAnalysis::Unavailable {
            reason: "Request failed: HTTP 429 Too Many Requests".into()
        }
    );
    assert_eq!(result.issues_for(Collaborator::EntityRecognizer).count(), 1);
    assert_eq!(result.issues_for(Collaborator::TextAnalyzer).count(), 1);
}

#[test]
fn test_ocr_failure_runs_on_empty_text() {
    let library = PatternLibrary::builtin().unwrap();
    let analyzer = Analyzer::new(&library)
        .with_ocr(&FailingOcr)
        .with_entity_recognizer(&StaticRecognizer)
        .with_text_analyzer(&WordyAnalyzer);

    let result = analyzer.analyze_input(&PrescriptionInput::Image(vec![0xff, 0xd8, 0xff]));

    assert_eq!(result.extracted_text, "");
    assert!(result.drugs.is_empty());
    assert!(result.dosage_frequency.is_empty());
    assert!(result.links.is_empty());
    let issue = result.issues_for(Collaborator::TextSource).next().unwrap();
    assert!(issue.message.contains("could not be decoded"));
}

#[test]
fn test_result_serializes_to_json() {
    let library = PatternLibrary::builtin().unwrap();
    let analyzer = Analyzer::new(&library);
    let result = analyzer.analyze_text("Zyrtec 10 mg at night");

    let json = result.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["drugs"][0], "zyrtec");
    assert_eq!(value["unresolved"][0]["name"], "zyrtec");
    assert_eq!(value["ai_analysis"]["status"], "unavailable");
    assert_eq!(value["links"]["zyrtec"].as_array().unwrap().len(), 4);
    assert_eq!(value["text_digest"].as_str().unwrap().len(), 64);
}

#[test]
fn test_each_analysis_gets_its_own_id() {
    let library = PatternLibrary::builtin().unwrap();
    let analyzer = Analyzer::new(&library);

    let first = analyzer.analyze_text("Omez 20 mg");
    let second = analyzer.analyze_text("Omez 20 mg");

    assert_ne!(first.analysis_id, second.analysis_id);
    assert_eq!(first.text_digest, second.text_digest);
    assert_eq!(first.drugs, second.drugs);
}

#[test]
fn test_library_shared_across_threads() {
    let library = std::sync::Arc::new(PatternLibrary::builtin().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let library = library.clone();
            std::thread::spawn(move || {
                let analyzer = Analyzer::new(&library);
                let text = format!("Tab Crocin {} mg", 500 + i * 50);
                analyzer.analyze_text(&text).drugs
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["paracetamol"]);
    }
}
