//! Per-field accessors turning raw match results into cleaned values.

use std::collections::BTreeSet;

use dischargex_core::{
    ExtractConfig, ExtractedRecord, Lemmatizer, AGE_NOT_FOUND, DATE_NOT_FOUND, DOCTOR_NOT_FOUND,
    NAME_NOT_FOUND, NO_ILLNESS_HISTORY, NO_LOCATION_FOUND, NO_MEDICAL_HISTORY, NO_SOCIAL_HISTORY,
    WEIGHT_NOT_FOUND,
};

use crate::anatomy;
use crate::medication;
use crate::parser::ParsedDocument;
use crate::patterns::Field;

/// Sub-headers of the diagnosis section that are not diagnoses themselves.
const DIAGNOSIS_SUBHEADERS: [&str; 4] = [
    "primary",
    "secondary",
    "primary diagnosis",
    "secondary diagnosis",
];

/// Pure per-field views over one parsed document. Every accessor degrades to
/// a documented default when its pattern is absent; none of them can fail.
pub struct FieldExtractor<'a> {
    doc: &'a ParsedDocument,
    config: &'a ExtractConfig,
    lemmatizer: &'a dyn Lemmatizer,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(
        doc: &'a ParsedDocument,
        config: &'a ExtractConfig,
        lemmatizer: &'a dyn Lemmatizer,
    ) -> Self {
        Self {
            doc,
            config,
            lemmatizer,
        }
    }

    pub fn patient_name(&self) -> String {
        self.first_or(Field::PatientName, NAME_NOT_FOUND)
    }

    pub fn doctor_name(&self) -> String {
        self.first_or(Field::DoctorName, DOCTOR_NOT_FOUND)
    }

    pub fn admission_date(&self) -> String {
        self.first_or(Field::AdmissionDate, DATE_NOT_FOUND)
    }

    pub fn age(&self) -> String {
        self.first_or(Field::Age, AGE_NOT_FOUND)
    }

    /// Maximum of every numeric weight mention, regardless of unit.
    /// Documents quote weight several times in mixed units; the maximum is
    /// the best-estimate heuristic. Tokens that fail to parse are skipped.
    pub fn weight(&self) -> String {
        let max = self
            .doc
            .all(Field::Weight)
            .iter()
            .filter_map(|token| token.parse::<f64>().ok())
            .fold(None, |max: Option<f64>, value| {
                Some(max.map_or(value, |m| m.max(value)))
            });
        match max {
            Some(value) => format_numeric(value),
            None => WEIGHT_NOT_FOUND.to_string(),
        }
    }

    /// Cleaned entries of the diagnosis section, in document order.
    /// Punctuation and digits are stripped wholesale, so numeric qualifiers
    /// disappear ("Type 2 Diabetes" comes out as "Type  Diabetes").
    pub fn disease_names(&self) -> Vec<String> {
        let Some(section) = self.doc.first(Field::Diagnosis) else {
            return Vec::new();
        };

        let mut entries: Vec<&str> = Vec::new();
        for line in section.split('\n') {
            if line.contains(',') {
                entries.extend(line.split(','));
            } else {
                entries.push(line);
            }
        }

        entries
            .into_iter()
            .filter_map(|entry| {
                let cleaned: String = entry
                    .chars()
                    .filter(|c| !c.is_ascii_punctuation() && !c.is_ascii_digit())
                    .collect();
                let cleaned = cleaned.trim();
                if cleaned.is_empty()
                    || DIAGNOSIS_SUBHEADERS.contains(&cleaned.to_lowercase().as_str())
                {
                    None
                } else {
                    Some(cleaned.to_string())
                }
            })
            .collect()
    }

    /// Body-region categories accumulated across every disease name.
    pub fn disease_locations(&self) -> BTreeSet<String> {
        let names = self.disease_names();
        let mut locations = anatomy::classify(names.iter().map(String::as_str));
        if locations.is_empty() {
            locations.insert(NO_LOCATION_FOUND.to_string());
        }
        locations
    }

    /// One description per non-empty line of the operation section, with
    /// standalone punctuation tokens and literal "none"/"None" lines dropped.
    pub fn operations(&self) -> Vec<String> {
        let Some(section) = self.doc.first(Field::Operation) else {
            return Vec::new();
        };

        section
            .split('\n')
            .filter_map(|line| {
                let kept: Vec<&str> = line
                    .split(' ')
                    .filter(|token| !is_punctuation_token(token))
                    .collect();
                let joined = kept.join(" ");
                if joined.is_empty() || joined == "none" || joined == "None" {
                    None
                } else {
                    Some(joined)
                }
            })
            .collect()
    }

    pub fn admission_medications(&self) -> Vec<String> {
        self.medications(Field::MedicationAdmission)
    }

    pub fn discharge_medications(&self) -> Vec<String> {
        self.medications(Field::MedicationDischarge)
    }

    pub fn medical_history(&self) -> String {
        self.flattened_section(Field::MedicalHistory, NO_MEDICAL_HISTORY)
    }

    pub fn illness_history(&self) -> String {
        self.flattened_section(Field::IllnessHistory, NO_ILLNESS_HISTORY)
    }

    pub fn more_info(&self) -> String {
        self.flattened_section(Field::SocialHistory, NO_SOCIAL_HISTORY)
    }

    /// Build the immutable output record. Disease locations serialize in
    /// their set order; `disease_type` stays reserved and empty.
    pub fn assemble(&self) -> ExtractedRecord {
        ExtractedRecord {
            patient_name: self.patient_name(),
            doctor_name: self.doctor_name(),
            admission_date: self.admission_date(),
            diseases: self.disease_names(),
            age: self.age(),
            weight: self.weight(),
            disease_type: String::new(),
            operations: self.operations(),
            disease_locations: self.disease_locations().into_iter().collect(),
            admission_medications: self.admission_medications(),
            discharge_medications: self.discharge_medications(),
            medical_history: self.medical_history(),
            illness_history: self.illness_history(),
            more_info: self.more_info(),
        }
    }

    fn first_or(&self, field: Field, default: &str) -> String {
        self.doc
            .first(field)
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    }

    fn medications(&self, field: Field) -> Vec<String> {
        match self.doc.first(field) {
            Some(section) => medication::extract_names(
                section,
                self.lemmatizer,
                self.config.trim_medication_names,
            ),
            None => Vec::new(),
        }
    }

    fn flattened_section(&self, field: Field, default: &str) -> String {
        match self.doc.first(field) {
            Some(section) => section.replace('\n', " "),
            None => default.to_string(),
        }
    }
}

fn is_punctuation_token(token: &str) -> bool {
    token.is_empty() || token.chars().all(|c| c.is_ascii_punctuation())
}

/// Render a float without a spurious trailing fraction.
fn format_numeric(value: f64) -> String {
    if (value.fract() - 0.0).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else if (value * 10.0).fract().abs() < f64::EPSILON {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dischargex_core::SuffixLemmatizer;

    fn with_doc<T>(text: &str, f: impl FnOnce(&FieldExtractor<'_>) -> T) -> T {
        let doc = ParsedDocument::parse(text);
        let config = ExtractConfig::default();
        let extractor = FieldExtractor::new(&doc, &config, &SuffixLemmatizer);
        f(&extractor)
    }

    #[test]
    fn missing_fields_resolve_to_defaults() {
        with_doc("nothing here", |ex| {
            assert_eq!(ex.patient_name(), NAME_NOT_FOUND);
            assert_eq!(ex.doctor_name(), DOCTOR_NOT_FOUND);
            assert_eq!(ex.admission_date(), DATE_NOT_FOUND);
            assert_eq!(ex.age(), AGE_NOT_FOUND);
            assert_eq!(ex.weight(), WEIGHT_NOT_FOUND);
            assert_eq!(ex.medical_history(), NO_MEDICAL_HISTORY);
            assert_eq!(ex.illness_history(), NO_ILLNESS_HISTORY);
            assert_eq!(ex.more_info(), NO_SOCIAL_HISTORY);
            assert!(ex.disease_names().is_empty());
            assert!(ex.operations().is_empty());
        });
    }

    #[test]
    fn weight_is_the_unit_agnostic_maximum() {
        with_doc("She weighed 70 kg on admission and 154 lb at discharge.", |ex| {
            assert_eq!(ex.weight(), "154");
        });
    }

    #[test]
    fn weight_keeps_a_meaningful_fraction() {
        with_doc("Weight 68.5 kg", |ex| {
            assert_eq!(ex.weight(), "68.5");
        });
    }

    #[test]
    fn disease_names_split_commas_and_strip_subheaders() {
        let text = "Discharge Diagnosis:\nPrimary:\nHeart Failure, Pneumonia\nSecondary Diagnosis:\nType 2 Diabetes\n\n\n\n\n";
        with_doc(text, |ex| {
            assert_eq!(
                ex.disease_names(),
                ["Heart Failure", "Pneumonia", "Type  Diabetes"]
            );
        });
    }

    #[test]
    fn empty_diagnosis_yields_no_location_found() {
        with_doc("no diagnosis section at all", |ex| {
            let locations: Vec<String> = ex.disease_locations().into_iter().collect();
            assert_eq!(locations, [NO_LOCATION_FOUND]);
        });
    }

    #[test]
    fn operations_drop_none_and_punctuation_lines() {
        let text = "Major Surgical or Invasive Procedure:\nNone\n\nAppendectomy\n. .\n\n\n\n\nPast history follows";
        with_doc(text, |ex| {
            assert_eq!(ex.operations(), ["Appendectomy"]);
        });
    }

    #[test]
    fn history_sections_flatten_line_breaks() {
        let text = "Past Medical History:\nCOPD\nCAD\n\n\n\n\nSocial History:\nLives alone\n";
        with_doc(text, |ex| {
            assert_eq!(ex.medical_history(), " COPD CAD");
            assert_eq!(ex.more_info(), " Lives alone ");
        });
    }

    #[test]
    fn assembled_record_reserves_disease_type() {
        with_doc("anything", |ex| {
            let record = ex.assemble();
            assert_eq!(record.disease_type, "");
        });
    }
}
