//! Prompts for generative prescription analysis.

/// System instruction sent with every analysis request.
pub const SYSTEM_PROMPT: &str = r#"You are a clinical pharmacy assistant that reviews medical prescriptions.

Read the prescription text carefully. It may come from OCR and contain spelling
mistakes, broken lines or brand names instead of generic names.

Never invent medications that are not in the text. If a section has nothing to
report, return an empty list for it."#;

/// Section keys the model is asked to fill, in prompt order.
pub const ANALYSIS_SECTIONS: [&str; 5] = [
    "medications",
    "dosages",
    "warnings",
    "conditions",
    "instructions",
];

/// User prompt for one prescription.
pub fn make_analysis_prompt(text: &str) -> String {
    format!(
        r#"Analyze this medical prescription text and provide:
1. List of medications mentioned
2. Dosages and frequencies
3. Any potential drug interactions or warnings
4. Medical conditions mentioned
5. Doctor's instructions

Prescription text: "{}"

Provide a structured analysis in JSON format. Return a JSON object with these keys,
each holding an array of strings:
- medications
- dosages
- warnings
- conditions
- instructions"#,
        text
    )
}
