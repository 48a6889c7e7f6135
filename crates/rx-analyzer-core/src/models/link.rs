//! Partner pharmacy sites and the purchase links built from them.

use serde::{Deserialize, Serialize};

/// Slot in a search URL template replaced by the encoded drug name.
pub const DRUG_SLOT: &str = "{}";

/// A partner pharmacy with a search URL template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartnerSite {
    /// Display name (e.g., "Netmeds")
    pub name: String,
    /// Landing page
    pub home_url: String,
    /// Search URL with exactly one `{}` slot
    pub search_url: String,
}

impl PartnerSite {
    pub fn new(name: &str, home_url: &str, search_url: &str) -> Self {
        Self {
            name: name.to_string(),
            home_url: home_url.to_string(),
            search_url: search_url.to_string(),
        }
    }

    /// Build the search link for a drug.
    ///
    /// Only spaces are escaped; other characters are substituted verbatim.
    pub fn link_for(&self, drug: &str) -> EcommerceLink {
        let encoded = drug.replace(' ', "%20");
        EcommerceLink {
            site_name: self.name.clone(),
            url: self.search_url.replacen(DRUG_SLOT, &encoded, 1),
        }
    }
}

/// A purchase link on one partner site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EcommerceLink {
    pub site_name: String,
    pub url: String,
}
