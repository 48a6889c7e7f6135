//! Plain-text analysis report.

use rx_analyzer_core::AnalysisResult;
use rx_analyzer_llm::parse_structured_analysis;

const NONE: &str = "  (none)";

/// Render a result as a sectioned text report.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("Analysis {} ({})", result.analysis_id, result.analyzed_at));
    lines.push(String::new());

    section(&mut lines, "Extracted text");
    if result.extracted_text.is_empty() {
        lines.push(NONE.to_string());
    } else {
        lines.extend(result.extracted_text.lines().map(|l| format!("  {}", l)));
    }

    section(&mut lines, "Identified drugs");
    bullet_list(&mut lines, &result.drugs);

    section(&mut lines, "Dosages");
    bullet_list(&mut lines, &result.dosage_frequency.dosages);

    section(&mut lines, "Frequencies");
    bullet_list(&mut lines, &result.dosage_frequency.frequencies);

    section(&mut lines, "Medical entities");
    if result.entities.is_empty() {
        lines.push(NONE.to_string());
    }
    for entity in &result.entities {
        lines.push(format!(
            "  - {} [{}] {:.0}%",
            entity.text,
            entity.label,
            entity.confidence * 100.0
        ));
    }

    section(&mut lines, "AI analysis");
    if result.ai_analysis.is_success() {
        let text = result.ai_analysis.display_text();
        match parse_structured_analysis(&text) {
            Ok(analysis) if !analysis.is_empty() => {
                for (title, items) in analysis.sections() {
                    if items.is_empty() {
                        continue;
                    }
                    lines.push(format!("  {}:", title));
                    lines.extend(items.iter().map(|item| format!("    - {}", item)));
                }
            }
            _ => lines.extend(text.lines().map(|l| format!("  {}", l))),
        }
    } else {
        lines.push(format!("  {}", result.ai_analysis.display_text()));
    }

    section(&mut lines, "Order online");
    if result.links.is_empty() {
        lines.push(NONE.to_string());
    }
    for drug in &result.drugs {
        lines.push(format!("  {}:", drug));
        for link in result.links_for(drug) {
            lines.push(format!("    {}: {}", link.site_name, link.url));
        }
    }

    if !result.unresolved.is_empty() {
        section(&mut lines, "Not in synonym table");
        for drug in &result.unresolved {
            match (&drug.suggestion, drug.similarity) {
                (Some(suggestion), Some(similarity)) => lines.push(format!(
                    "  - {} (did you mean {}? {:.2})",
                    drug.name, suggestion, similarity
                )),
                _ => lines.push(format!("  - {}", drug.name)),
            }
        }
    }

    if !result.issues.is_empty() {
        section(&mut lines, "Issues");
        for issue in &result.issues {
            lines.push(format!("  - {}: {}", issue.collaborator, issue.message));
        }
    }

    lines.join("\n")
}

fn section(lines: &mut Vec<String>, title: &str) {
    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
    lines.push(format!("{}:", title));
}

fn bullet_list(lines: &mut Vec<String>, items: &[String]) {
    if items.is_empty() {
        lines.push(NONE.to_string());
    }
    lines.extend(items.iter().map(|item| format!("  - {}", item)));
}
