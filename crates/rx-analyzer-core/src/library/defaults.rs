//! Built-in tables shipped with the analyzer.

use std::collections::BTreeMap;

use crate::models::PartnerSite;

/// Default dosage patterns.
pub fn default_dosage_patterns() -> Vec<String> {
    [
        r"\d+\s*mg\b",
        r"\d+\s*g\b",
        r"\d+\s*ml\b",
        r"\d+\s*mcg\b",
        r"\d+\s*units?\b",
        r"\d+\s*tablets?\b",
        r"\d+\s*capsules?\b",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

/// Default frequency patterns.
pub fn default_frequency_patterns() -> Vec<String> {
    [
        r"\bonce\s+daily\b",
        r"\btwice\s+daily\b",
        r"\bthrice\s+daily\b",
        r"\b\d+\s+times?\s+daily\b",
        r"\bevery\s+\d+\s+hours?\b",
        r"\bbid\b",
        r"\btid\b",
        r"\bqid\b",
        r"\bod\b",
        r"\bbd\b",
        r"\bmorning\b",
        r"\bevening\b",
        r"\bnight\b",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

/// Default synonym table: canonical name → brand/alias names.
pub fn default_synonyms() -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();

    // Analgesics / NSAIDs
    map.insert(
        "paracetamol".into(),
        vec!["acetaminophen".into(), "tylenol".into(), "crocin".into(), "dolo".into()],
    );
    map.insert(
        "ibuprofen".into(),
        vec!["brufen".into(), "advil".into(), "combiflam".into()],
    );
    map.insert("aspirin".into(), vec!["disprin".into(), "ecosprin".into()]);

    // Antibiotics
    map.insert("amoxicillin".into(), vec!["augmentin".into(), "amoxil".into()]);

    // Antidiabetics
    map.insert("metformin".into(), vec!["glucophage".into(), "glycomet".into()]);

    // GI
    map.insert("omeprazole".into(), vec!["prilosec".into(), "omez".into()]);

    // Cardiac
    map.insert("atorvastatin".into(), vec!["lipitor".into(), "atorlip".into()]);
    map.insert("amlodipine".into(), vec!["norvasc".into(), "amlovas".into()]);

    map
}

/// Default partner pharmacy sites, in display order.
pub fn default_sites() -> Vec<PartnerSite> {
    vec![
        PartnerSite::new(
            "1mg",
            "https://www.1mg.com",
            "https://www.1mg.com/search/all?name={}",
        ),
        PartnerSite::new(
            "Netmeds",
            "https://www.netmeds.com",
            "https://www.netmeds.com/catalogsearch/result/{}/all",
        ),
        PartnerSite::new(
            "PharmEasy",
            "https://pharmeasy.in",
            "https://pharmeasy.in/search/all?name={}",
        ),
        PartnerSite::new(
            "Apollo Pharmacy",
            "https://www.apollopharmacy.in",
            "https://www.apollopharmacy.in/search-medicines/{}",
        ),
    ]
}
