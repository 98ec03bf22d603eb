//! Single-pass application of the pattern catalog to one document.

use std::collections::HashMap;

use crate::patterns::{catalog, Field, MatchMode};

/// The raw match results for one discharge summary. Computed eagerly on
/// construction and immutable afterwards; a pure function of the input text
/// and the pattern catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    text: String,
    firsts: HashMap<Field, String>,
    alls: HashMap<Field, Vec<String>>,
}

impl ParsedDocument {
    /// Apply every catalog pattern to `text` exactly once. Total: a pattern
    /// that does not match is recorded as absent, never as an error.
    pub fn parse(text: &str) -> Self {
        let mut firsts = HashMap::new();
        let mut alls = HashMap::new();

        for pattern in catalog() {
            let Some(re) = pattern.regex.as_ref() else {
                if pattern.mode == MatchMode::All {
                    alls.insert(pattern.field, Vec::new());
                }
                continue;
            };

            match pattern.mode {
                MatchMode::First => {
                    if let Some(payload) = re
                        .captures(text)
                        .and_then(|caps| caps.get(pattern.payload_group))
                    {
                        firsts.insert(pattern.field, payload.as_str().to_string());
                    }
                }
                MatchMode::All => {
                    let payloads = re
                        .captures_iter(text)
                        .filter_map(|caps| caps.get(pattern.payload_group))
                        .map(|payload| payload.as_str().to_string())
                        .collect();
                    alls.insert(pattern.field, payloads);
                }
            }
        }

        Self {
            text: text.to_string(),
            firsts,
            alls,
        }
    }

    /// The raw document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Payload of the first occurrence of a first-match field, if any.
    pub fn first(&self, field: Field) -> Option<&str> {
        self.firsts.get(&field).map(String::as_str)
    }

    /// Payloads of every occurrence of an all-matches field.
    pub fn all(&self, field: Field) -> &[String] {
        self.alls.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_deterministic() {
        let text = "Admission Date: [**2181-3-23**]\nAttending: [**First Last**]\nWeight: 70 kg";
        assert_eq!(ParsedDocument::parse(text), ParsedDocument::parse(text));
    }

    #[test]
    fn parse_is_total_on_arbitrary_text() {
        for text in ["", "\n\n\n\n\n", "[**]", "討論: データ", "a,b,c\u{0}"] {
            let doc = ParsedDocument::parse(text);
            assert!(doc.first(Field::Diagnosis).is_none());
            assert!(doc.all(Field::Weight).is_empty());
        }
    }

    #[test]
    fn absent_patterns_read_back_as_empty() {
        let doc = ParsedDocument::parse("nothing recognizable here");
        assert_eq!(doc.first(Field::PatientName), None);
        assert_eq!(doc.all(Field::InlineMedication), &[] as &[String]);
        assert_eq!(doc.text(), "nothing recognizable here");
    }

    #[test]
    fn hospital_course_and_treatment_sections_are_captured() {
        let text = "Brief Hospital Course:\nDiuresed well.\n\n\n\n\nDischarge Instructions:\nWeigh daily.\n";
        let doc = ParsedDocument::parse(text);
        assert_eq!(doc.first(Field::HospitalCourse), Some("\nDiuresed well."));
        assert_eq!(doc.first(Field::Treatment), Some("\nWeigh daily.\n"));
    }

    #[test]
    fn inline_medication_mentions_are_collected_document_wide() {
        // The word-sequence group is greedy, so leading prose sticks to the
        // drug name. That is the catalog's behavior, not a parser concern.
        let text = "Started on Lasix 40 mg in the ED. Home dose is Aspirin 81 mg.";
        let doc = ParsedDocument::parse(text);
        assert_eq!(
            doc.all(Field::InlineMedication),
            &["Started on Lasix", "Home dose is Aspirin"]
        );
    }

    #[test]
    fn weight_collects_every_mention() {
        let doc = ParsedDocument::parse("Weight on admission 70 kg, later 154 lbs and 68.5 kg.");
        assert_eq!(doc.all(Field::Weight), &["70", "154", "68.5"]);
    }
}
