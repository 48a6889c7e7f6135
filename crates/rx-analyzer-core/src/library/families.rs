//! Drug-name pattern families.
//!
//! Each family declares which capture group carries the candidate token, so the
//! matcher never has to guess between whole matches and inner groups.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// The three ways a drug name is spotted in prescription text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyKind {
    /// Known drug-class suffixes (amoxi*cillin*, omep*razole*, ...)
    SuffixMorphology,
    /// Name preceded by a dosage-form abbreviation (tab, cap, syp, inj)
    DosageFormPrefix,
    /// Name immediately followed by a numeric dose with unit
    QuantitySuffix,
}

impl FamilyKind {
    /// All families, in the order the matcher runs them.
    pub const ALL: [FamilyKind; 3] = [
        FamilyKind::SuffixMorphology,
        FamilyKind::DosageFormPrefix,
        FamilyKind::QuantitySuffix,
    ];

    /// Capture group index holding the candidate (0 = whole match).
    pub fn capture_index(self) -> usize {
        match self {
            FamilyKind::SuffixMorphology => 0,
            FamilyKind::DosageFormPrefix | FamilyKind::QuantitySuffix => 1,
        }
    }

    /// Source pattern for this family.
    pub fn pattern(self) -> &'static str {
        match self {
            FamilyKind::SuffixMorphology => {
                r"\b[a-z]+(?:cillin|mycin|prazole|statin|dipine|formin)\b"
            }
            FamilyKind::DosageFormPrefix => {
                r"\b(?:tab|cap|syp|inj)[\s.]+([a-z]+(?:\s+[a-z]+)?)\b"
            }
            FamilyKind::QuantitySuffix => r"\b([a-z]{3,})\s+\d+\s*(?:mg|g|ml|mcg)\b",
        }
    }
}

/// A compiled pattern family.
#[derive(Debug, Clone)]
pub struct PatternFamily {
    kind: FamilyKind,
    regex: Regex,
}

impl PatternFamily {
    /// Compile a family's pattern case-insensitively.
    pub fn compile(kind: FamilyKind) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(kind.pattern())
            .case_insensitive(true)
            .build()?;
        Ok(Self { kind, regex })
    }

    pub fn kind(&self) -> FamilyKind {
        self.kind
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}
