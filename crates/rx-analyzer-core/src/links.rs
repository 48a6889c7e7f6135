//! Purchase link builder.

use std::collections::BTreeMap;

use crate::library::PatternLibrary;
use crate::models::EcommerceLink;

/// Builds partner-site search links for drug names. Makes no network calls.
pub struct LinkBuilder<'a> {
    library: &'a PatternLibrary,
}

impl<'a> LinkBuilder<'a> {
    pub fn new(library: &'a PatternLibrary) -> Self {
        Self { library }
    }

    /// One link per partner site for each drug, in site order.
    pub fn build_links<S: AsRef<str>>(&self, drugs: &[S]) -> BTreeMap<String, Vec<EcommerceLink>> {
        drugs
            .iter()
            .map(|drug| {
                let drug = drug.as_ref();
                let links = self
                    .library
                    .sites()
                    .iter()
                    .map(|site| site.link_for(drug))
                    .collect();
                (drug.to_string(), links)
            })
            .collect()
    }
}
