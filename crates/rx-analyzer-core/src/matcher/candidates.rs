//! Candidate token extraction.

use crate::library::{FamilyKind, PatternFamily};

/// Candidates this short are OCR noise.
pub const MIN_CANDIDATE_LEN: usize = 3;

/// An unvalidated drug-name token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateToken {
    /// Family that produced the token
    pub family: FamilyKind,
    /// Lower-cased, trimmed token text
    pub text: String,
    /// Byte offset in the source text
    pub offset: usize,
}

/// Run every family over `text`, family by family, in match order.
pub fn collect_candidates(families: &[PatternFamily], text: &str) -> Vec<CandidateToken> {
    let mut candidates = Vec::new();

    for family in families {
        let group = family.kind().capture_index();
        for captures in family.regex().captures_iter(text) {
            let Some(m) = captures.get(group) else {
                continue;
            };
            let token = m.as_str().trim();
            if token.chars().count() < MIN_CANDIDATE_LEN {
                continue;
            }
            candidates.push(CandidateToken {
                family: family.kind(),
                text: token.to_lowercase(),
                offset: m.start(),
            });
        }
    }

    candidates
}
