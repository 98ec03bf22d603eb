//! Discharge-summary field extraction: a fixed pattern catalog, a one-pass
//! document parser and per-field cleanup pipelines producing one
//! `ExtractedRecord` per document.

pub mod anatomy;
mod extract;
mod medication;
pub mod parser;
pub mod patterns;

pub use extract::FieldExtractor;
pub use parser::ParsedDocument;

use dischargex_core::{ExtractConfig, ExtractedRecord, Lemmatizer, SuffixLemmatizer};

/// Extract one record from raw document text with the default English
/// suffix lemmatizer.
pub fn extract_record(text: &str, config: &ExtractConfig) -> ExtractedRecord {
    extract_record_with(text, config, &SuffixLemmatizer)
}

/// Extract one record with a caller-supplied lemmatizer. Never fails:
/// every absent field degrades to its documented default.
pub fn extract_record_with(
    text: &str,
    config: &ExtractConfig,
    lemmatizer: &dyn Lemmatizer,
) -> ExtractedRecord {
    let doc = ParsedDocument::parse(text);
    FieldExtractor::new(&doc, config, lemmatizer).assemble()
}
