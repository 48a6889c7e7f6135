//! Pattern library: dosage/frequency patterns, synonym table, partner sites.
//!
//! [`LibraryTables`] is the serializable source form (built-in defaults or a JSON
//! document). [`LibraryTables::compile`] validates it into a read-only
//! [`PatternLibrary`] that every component borrows.

mod defaults;
mod families;

pub use defaults::*;
pub use families::*;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PartnerSite;

/// Library errors.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Invalid {kind} pattern `{pattern}`: {source}")]
    InvalidPattern {
        kind: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Site `{site}` search URL must contain exactly one `{{}}` slot: {template}")]
    InvalidSiteTemplate { site: String, template: String },

    #[error("Synonym table contains an empty canonical name")]
    EmptyCanonicalName,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Uncompiled library tables.
///
/// Missing fields in a JSON document fall back to the built-in tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryTables {
    /// Dosage regexes, applied in order
    pub dosage_patterns: Vec<String>,
    /// Frequency regexes, applied in order
    pub frequency_patterns: Vec<String>,
    /// Canonical drug name → aliases
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Partner pharmacy sites, in link order
    pub sites: Vec<PartnerSite>,
}

impl Default for LibraryTables {
    fn default() -> Self {
        Self {
            dosage_patterns: default_dosage_patterns(),
            frequency_patterns: default_frequency_patterns(),
            synonyms: default_synonyms(),
            sites: default_sites(),
        }
    }
}

impl LibraryTables {
    /// Parse tables from a JSON document.
    pub fn from_json(json: &str) -> LibraryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read tables from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> LibraryResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Validate and compile into a [`PatternLibrary`].
    pub fn compile(&self) -> LibraryResult<PatternLibrary> {
        let dosage_patterns = compile_patterns("dosage", &self.dosage_patterns)?;
        let frequency_patterns = compile_patterns("frequency", &self.frequency_patterns)?;

        let mut families = Vec::with_capacity(FamilyKind::ALL.len());
        for kind in FamilyKind::ALL {
            let family =
                PatternFamily::compile(kind).map_err(|source| LibraryError::InvalidPattern {
                    kind: "drug name",
                    pattern: kind.pattern().to_string(),
                    source,
                })?;
            families.push(family);
        }

        let mut synonyms: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (canonical, aliases) in &self.synonyms {
            let canonical = canonical.trim().to_lowercase();
            if canonical.is_empty() {
                return Err(LibraryError::EmptyCanonicalName);
            }
            let entry = synonyms.entry(canonical).or_default();
            for alias in aliases {
                let alias = alias.trim().to_lowercase();
                if !alias.is_empty() && !entry.contains(&alias) {
                    entry.push(alias);
                }
            }
        }

        // First canonical (in sorted order) claims a shared alias
        let mut alias_index = HashMap::new();
        for (canonical, aliases) in &synonyms {
            for alias in aliases {
                alias_index
                    .entry(alias.clone())
                    .or_insert_with(|| canonical.clone());
            }
        }

        for site in &self.sites {
            if site.search_url.matches("{}").count() != 1 {
                return Err(LibraryError::InvalidSiteTemplate {
                    site: site.name.clone(),
                    template: site.search_url.clone(),
                });
            }
        }

        Ok(PatternLibrary {
            dosage_patterns,
            frequency_patterns,
            families,
            synonyms,
            alias_index,
            sites: self.sites.clone(),
        })
    }
}

fn compile_patterns(kind: &'static str, patterns: &[String]) -> LibraryResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| LibraryError::InvalidPattern {
                    kind,
                    pattern: pattern.clone(),
                    source,
                })
        })
        .collect()
}

/// Compiled, read-only pattern library.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    dosage_patterns: Vec<Regex>,
    frequency_patterns: Vec<Regex>,
    families: Vec<PatternFamily>,
    /// Canonical → aliases, iterated in sorted canonical order
    synonyms: BTreeMap<String, Vec<String>>,
    /// Alias → canonical
    alias_index: HashMap<String, String>,
    sites: Vec<PartnerSite>,
}

impl PatternLibrary {
    /// Compile the built-in tables.
    pub fn builtin() -> LibraryResult<Self> {
        LibraryTables::default().compile()
    }

    pub fn dosage_patterns(&self) -> &[Regex] {
        &self.dosage_patterns
    }

    pub fn frequency_patterns(&self) -> &[Regex] {
        &self.frequency_patterns
    }

    pub fn families(&self) -> &[PatternFamily] {
        &self.families
    }

    pub fn synonyms(&self) -> &BTreeMap<String, Vec<String>> {
        &self.synonyms
    }

    pub fn sites(&self) -> &[PartnerSite] {
        &self.sites
    }

    /// Whether `name` is a canonical drug name.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.synonyms.contains_key(name)
    }

    /// Canonical name for an exact (lower-cased) alias.
    pub fn canonical_for_alias(&self, alias: &str) -> Option<&str> {
        self.alias_index.get(alias).map(String::as_str)
    }

    /// Iterate `(canonical, terms)` where terms are the canonical name followed by
    /// its aliases.
    pub fn terms(&self) -> impl Iterator<Item = (&str, Vec<&str>)> + '_ {
        self.synonyms.iter().map(|(canonical, aliases)| {
            let mut terms = Vec::with_capacity(aliases.len() + 1);
            terms.push(canonical.as_str());
            terms.extend(aliases.iter().map(String::as_str));
            (canonical.as_str(), terms)
        })
    }
}
