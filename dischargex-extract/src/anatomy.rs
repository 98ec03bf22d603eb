//! Fixed anatomical lexicon mapping keywords to body-region categories.

use std::collections::BTreeSet;

/// Category label plus its keyword set. Static, never mutated at runtime.
pub const CATEGORIES: [(&str, &[&str]); 6] = [
    (
        "head",
        &[
            "eye", "ear", "nose", "mouth", "forehead", "eyebrow", "lip", "cheek", "chin",
            "tongue", "tooth", "jaw", "deaf", "blind", "brain",
        ],
    ),
    (
        "upper_body",
        &[
            "shoulder", "arm", "chest", "back", "elbow", "wrist", "hand", "finger", "thumb",
            "neck", "ribs", "abdomen", "waist",
        ],
    ),
    (
        "lower_body",
        &[
            "hip", "leg", "knee", "thigh", "foot", "calf", "ankle", "toe", "buttocks", "groin",
            "heel", "shin",
        ],
    ),
    (
        "digestive_system",
        &[
            "stomach",
            "liver",
            "intestine",
            "kidney",
            "bladder",
            "pancreas",
            "spleen",
            "esophagus",
            "gallbladder",
            "bowel",
            "rectum",
            "rectal",
            "renal",
        ],
    ),
    (
        "respiratory_system",
        &[
            "lung",
            "throat",
            "trachea",
            "bronchi",
            "diaphragm",
            "alveoli",
            "nostril",
            "larynx",
            "pharynx",
            "pleura",
        ],
    ),
    (
        "circulatory_system",
        &[
            "heart",
            "vein",
            "capillaries",
            "aorta",
            "artery",
            "hypertension",
            "stroke",
            "vascular",
        ],
    ),
];

/// Tag each disease name with every category whose keywords occur in it.
///
/// Matching is case-insensitive substring search, not whole-word: "ear" also
/// fires inside unrelated words containing it. That is an accepted heuristic
/// limitation of the lexicon.
pub fn classify<'a, I>(disease_names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut locations = BTreeSet::new();
    for disease in disease_names {
        let lowered = disease.to_lowercase();
        for (category, keywords) in CATEGORIES {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                locations.insert(category.to_string());
            }
        }
    }
    locations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heart_failure_is_circulatory() {
        let locations = classify(["Heart Failure"]);
        assert!(locations.contains("circulatory_system"));
        // Substring matching also fires "ear" inside "Heart".
        assert!(locations.contains("head"));
    }

    #[test]
    fn one_disease_can_hit_multiple_categories() {
        let locations = classify(["Renal artery stenosis"]);
        assert!(locations.contains("digestive_system"));
        assert!(locations.contains("circulatory_system"));
    }

    #[test]
    fn keywords_match_as_substrings() {
        // "ear" inside "Earache"; whole-word matching is not attempted.
        let locations = classify(["Earache"]);
        assert!(locations.contains("head"));
    }

    #[test]
    fn unknown_disease_yields_nothing() {
        assert!(classify(["Idiopathic syndrome"]).is_empty());
    }
}
