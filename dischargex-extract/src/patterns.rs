//! The fixed catalog of field patterns applied to every discharge summary.
//!
//! Patterns are compiled once at first use. A pattern that fails to compile
//! degrades to "never matches" so the catalog scan stays total.

use regex::Regex;
use std::sync::LazyLock;

/// Identifier of one extractable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PatientName,
    DoctorName,
    AdmissionDate,
    Weight,
    Age,
    Diagnosis,
    HospitalCourse,
    Treatment,
    MedicationDischarge,
    MedicationAdmission,
    IllnessHistory,
    MedicalHistory,
    SocialHistory,
    InlineMedication,
    Operation,
}

/// How a pattern is applied to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Keep the first occurrence only; absence is a valid outcome.
    First,
    /// Collect every non-overlapping occurrence.
    All,
}

/// One catalog entry: the rule plus which capture group holds the payload.
pub struct FieldPattern {
    pub field: Field,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub payload_group: usize,
    pub mode: MatchMode,
}

macro_rules! field_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

field_pattern!(
    RE_PATIENT_NAME,
    r"(?i)(attending:|mr\.|mrs\.|ms\.)\s*\[\*\*(.+?)\*\*\]"
);

field_pattern!(
    RE_DOCTOR_NAME,
    r"(?i)(dr\.?|doctor|physician|surgeon)s?\s*\[\*\*(.+?)\*\*\]"
);

field_pattern!(RE_ADMISSION_DATE, r"(?i)admission date:\s*\[\*\*(.+?)\*\*\]");

field_pattern!(RE_WEIGHT, r"(?i)(\d+\.?\d*)\s*(kg|kilo|kilogram|pound|lb)s?");

field_pattern!(RE_AGE, r"(?i)(\d+)\s*(year old|years old|yo|y/o)");

// Section patterns capture everything after the labeled header up to the
// next recognized header, a run of four or more line breaks, or end of
// input for an unterminated trailing section.
field_pattern!(
    RE_DIAGNOSIS,
    r"(?is)discharge diagnosis:(.*?)(?:\n{4,}|discharge|\z)"
);

field_pattern!(
    RE_HOSPITAL_COURSE,
    r"(?is)brief hospital course:(.*?)(?:\n{4,}|medications|\z)"
);

field_pattern!(
    RE_TREATMENT,
    r"(?is)discharge instructions:(.*?)(?:\n{4,}|followup|\z)"
);

field_pattern!(
    RE_MEDICATION_DISCHARGE,
    r"(?is)discharge medications:(.*?)(?:\n{4,}|discharge|\z)"
);

field_pattern!(
    RE_MEDICATION_ADMISSION,
    r"(?is)medications on admission:(.*?)(?:\n{4,}|discharge|\z)"
);

field_pattern!(
    RE_ILLNESS_HISTORY,
    r"(?is)history of present illness:(.*?)(?:\n{4,}|past|\z)"
);

field_pattern!(
    RE_MEDICAL_HISTORY,
    r"(?is)past medical history:(.*?)(?:\n{4,}|social|\z)"
);

field_pattern!(
    RE_SOCIAL_HISTORY,
    r"(?is)social history:(.*?)(?:\n{4,}|physical|\z)"
);

field_pattern!(
    RE_INLINE_MEDICATION,
    r"(?i)([a-z][a-z\- ]+)\s[\d.\-]+\s*(g|mg|mgs|mcg|unit|qam|qpm|dl)s?"
);

field_pattern!(
    RE_OPERATION,
    r"(?is)major surgical or invasive procedure(.*?)(?:\n{4,}|history|\z)"
);

/// All field patterns in catalog order.
pub fn catalog() -> Vec<FieldPattern> {
    vec![
        FieldPattern {
            field: Field::PatientName,
            regex: &RE_PATIENT_NAME,
            payload_group: 2,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::DoctorName,
            regex: &RE_DOCTOR_NAME,
            payload_group: 2,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::AdmissionDate,
            regex: &RE_ADMISSION_DATE,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::Weight,
            regex: &RE_WEIGHT,
            payload_group: 1,
            mode: MatchMode::All,
        },
        FieldPattern {
            field: Field::Age,
            regex: &RE_AGE,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::Diagnosis,
            regex: &RE_DIAGNOSIS,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::HospitalCourse,
            regex: &RE_HOSPITAL_COURSE,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::Treatment,
            regex: &RE_TREATMENT,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::MedicationDischarge,
            regex: &RE_MEDICATION_DISCHARGE,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::MedicationAdmission,
            regex: &RE_MEDICATION_ADMISSION,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::IllnessHistory,
            regex: &RE_ILLNESS_HISTORY,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::MedicalHistory,
            regex: &RE_MEDICAL_HISTORY,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::SocialHistory,
            regex: &RE_SOCIAL_HISTORY,
            payload_group: 1,
            mode: MatchMode::First,
        },
        FieldPattern {
            field: Field::InlineMedication,
            regex: &RE_INLINE_MEDICATION,
            payload_group: 1,
            mode: MatchMode::All,
        },
        FieldPattern {
            field: Field::Operation,
            regex: &RE_OPERATION,
            payload_group: 1,
            mode: MatchMode::First,
        },
    ]
}
