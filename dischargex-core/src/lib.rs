//! Core types shared by the discharge-summary extraction engine and its
//! drivers: the output record, extraction config, the pluggable lemmatizer
//! capability and the source/sink collaborator traits.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the extraction engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractConfig {
    /// Trim the leading space that the medication-name cleanup introduces
    /// when it re-joins surviving words. Off by default to keep the legacy
    /// output byte-for-byte.
    pub trim_medication_names: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            trim_medication_names: false,
        }
    }
}

/// Default value for an absent patient name.
pub const NAME_NOT_FOUND: &str = "Name not found";
/// Default value for an absent doctor name.
pub const DOCTOR_NOT_FOUND: &str = "Doctor not found";
/// Default value for an absent admission date.
pub const DATE_NOT_FOUND: &str = "Date not found";
/// Default value for an absent patient age.
pub const AGE_NOT_FOUND: &str = "Age not found";
/// Default value when no weight mention exists anywhere in the document.
pub const WEIGHT_NOT_FOUND: &str = "No weight found";
/// Sole member of the location set when no disease maps to a body region.
pub const NO_LOCATION_FOUND: &str = "No location found";
/// Default value for an absent past-medical-history section.
pub const NO_MEDICAL_HISTORY: &str = "No history found";
/// Default value for an absent history-of-present-illness section.
pub const NO_ILLNESS_HISTORY: &str = "No prior info on present illness found";
/// Default value for an absent social-history section.
pub const NO_SOCIAL_HISTORY: &str = "No social history";

/// One structured record per discharge summary. Built once from a parsed
/// document and immutable afterwards; field declaration order is the fixed
/// output key order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedRecord {
    #[serde(rename = "Patient Name")]
    pub patient_name: String,
    #[serde(rename = "Doctor Name")]
    pub doctor_name: String,
    #[serde(rename = "Admission Date")]
    pub admission_date: String,
    #[serde(rename = "Diagnosed Diseases")]
    pub diseases: Vec<String>,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Weight")]
    pub weight: String,
    /// Reserved key, always empty.
    #[serde(rename = "Disease Type")]
    pub disease_type: String,
    #[serde(rename = "Operation Type")]
    pub operations: Vec<String>,
    #[serde(rename = "Disease Location")]
    pub disease_locations: Vec<String>,
    #[serde(rename = "Medication on Admission")]
    pub admission_medications: Vec<String>,
    #[serde(rename = "Medication on Discharge")]
    pub discharge_medications: Vec<String>,
    #[serde(rename = "Medical History")]
    pub medical_history: String,
    #[serde(rename = "Illness History")]
    pub illness_history: String,
    #[serde(rename = "More Info")]
    pub more_info: String,
}

/// Reduce a word to the base form used for stop-word comparison. The engine
/// lower-cases before calling, so implementations may assume lowercase input.
pub trait Lemmatizer {
    fn base_form(&self, word: &str) -> String;
}

/// Suffix-stripping English lemmatizer covering the plural forms that occur
/// in medication lists ("tablets", "units", "caps"). Deliberately shallow;
/// anything it does not recognize passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixLemmatizer;

impl Lemmatizer for SuffixLemmatizer {
    fn base_form(&self, word: &str) -> String {
        if word.len() > 4 && word.ends_with("ies") {
            let mut base = word[..word.len() - 3].to_string();
            base.push('y');
            return base;
        }
        for suffix in ["sses", "ches", "shes", "xes", "zes"] {
            if word.len() > suffix.len() && word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        if word.len() > 3
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return word[..word.len() - 1].to_string();
        }
        word.to_string()
    }
}

/// A collaborator that yields `(document id, full text)` pairs.
pub trait DocumentSource {
    fn documents(&mut self) -> Result<Vec<(String, String)>, ExtractError>;
}

/// A collaborator that persists one record per document id.
pub trait RecordSink {
    fn write_record(&mut self, id: &str, record: &ExtractedRecord) -> Result<(), ExtractError>;
}

/// Errors surfaced by the peripheral collaborators. Field extraction itself
/// never fails; absence of a pattern is a default value, not an error.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read from the document source: {0}")]
    Source(String),
    #[error("failed to write to the record sink: {0}")]
    Sink(String),
    #[error("record could not be serialized: {0}")]
    Serialize(String),
}
