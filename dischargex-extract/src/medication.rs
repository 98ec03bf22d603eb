//! Medication-name extraction: an ordered chain of candidate strategies
//! followed by a lemmatized stop-word cleanup.
//!
//! Real medication lists are formatted too inconsistently for a single
//! rule, so candidates come from the first strategy in the chain that
//! yields anything at all.

use dischargex_core::Lemmatizer;
use regex::Regex;
use std::sync::LazyLock;

static RE_DOSED_WITH_UNIT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([a-z][a-z\- ]+)\s[\d.\-]*\s*(g|mg|mgs|mcg|unit|u|qam|qpm|%|prn|mdi|daily|weekly|monthly|qd|once|twice)",
    )
    .ok()
});

static RE_DOSED_BARE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)([a-z][a-z\- ]+)\s[\d.\-]+").ok());

/// Words that never belong in a medication name: dosing fillers, routes,
/// frequencies and unit abbreviations. Compared against the lower-cased
/// base form of each word.
const STOP_WORDS: [&str; 28] = [
    "for", "every", "per", "daily", "monthly", "once", "day", "month", "by", "mouth", "inhale",
    "unit", "g", "mg", "mgs", "mcg", "qam", "qpm", "dl", "ml", "%", "tab", "tablet", "qhs", "po",
    "cap", "none", "qd",
];

/// One candidate-producing strategy. Ordered from strictest to loosest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// `<name> <dose> <unit-or-frequency keyword>` tokens.
    DosedWithUnit,
    /// `<name> <numeric-looking token>` without a unit keyword.
    DosedBare,
    /// Comma-separated section; only applies when a comma is present.
    CommaList,
    /// One candidate per line. Always yields something, terminating the chain.
    LineList,
}

const STRATEGY_CHAIN: [Strategy; 4] = [
    Strategy::DosedWithUnit,
    Strategy::DosedBare,
    Strategy::CommaList,
    Strategy::LineList,
];

impl Strategy {
    fn candidates(self, section: &str) -> Vec<String> {
        match self {
            Strategy::DosedWithUnit => capture_names(&RE_DOSED_WITH_UNIT, section),
            Strategy::DosedBare => capture_names(&RE_DOSED_BARE, section),
            Strategy::CommaList => {
                if section.contains(',') {
                    section.split(',').map(|part| part.trim().to_string()).collect()
                } else {
                    Vec::new()
                }
            }
            Strategy::LineList => section
                .split('\n')
                .map(|line| line.trim().to_string())
                .collect(),
        }
    }
}

fn capture_names(regex: &LazyLock<Option<Regex>>, section: &str) -> Vec<String> {
    let Some(re) = regex.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(section)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

/// Extract cleaned medication names from one medication section.
///
/// Without `trim`, every surviving word keeps its leading space
/// (" Aspirin" rather than "Aspirin"), reproducing the legacy token-join
/// convention.
pub(crate) fn extract_names(
    section: &str,
    lemmatizer: &dyn Lemmatizer,
    trim: bool,
) -> Vec<String> {
    let candidates = STRATEGY_CHAIN
        .iter()
        .map(|strategy| strategy.candidates(section))
        .find(|candidates| !candidates.is_empty())
        .unwrap_or_default();

    candidates
        .iter()
        .filter_map(|candidate| clean_candidate(candidate, lemmatizer, trim))
        .collect()
}

/// Drop stop-words from one candidate; `None` when nothing survives.
fn clean_candidate(candidate: &str, lemmatizer: &dyn Lemmatizer, trim: bool) -> Option<String> {
    let mut cleaned = String::new();
    for word in candidate.split(' ') {
        if is_stop_word(word, lemmatizer) {
            continue;
        }
        cleaned.push(' ');
        cleaned.push_str(word);
    }

    if cleaned.is_empty() {
        None
    } else if trim {
        Some(cleaned.trim_start().to_string())
    } else {
        Some(cleaned)
    }
}

fn is_stop_word(word: &str, lemmatizer: &dyn Lemmatizer) -> bool {
    if word.is_empty() {
        return true;
    }
    let base = lemmatizer.base_form(&word.to_lowercase());
    if STOP_WORDS.contains(&base.as_str()) {
        return true;
    }
    // Standalone punctuation characters count as stop-words too.
    base.len() == 1 && base.chars().all(|c| c.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dischargex_core::SuffixLemmatizer;

    /// Pass-through lemmatizer proving the filter is language-neutral.
    struct StubLemmatizer;

    impl Lemmatizer for StubLemmatizer {
        fn base_form(&self, word: &str) -> String {
            word.to_string()
        }
    }

    #[test]
    fn dosed_section_uses_the_strict_strategy() {
        let names = extract_names(
            "Aspirin 81 mg daily, Metoprolol 50mg twice",
            &SuffixLemmatizer,
            true,
        );
        assert_eq!(names, ["Aspirin", "Metoprolol"]);
    }

    #[test]
    fn bare_numeric_doses_fall_back_to_the_relaxed_strategy() {
        // No unit or frequency keyword anywhere, so the strict strategy
        // stays empty and the bare-dose one fires.
        let names = extract_names("Aspirin 81\nWarfarin 5", &SuffixLemmatizer, true);
        assert_eq!(names, ["Aspirin", "Warfarin"]);
    }

    #[test]
    fn undosed_comma_list_falls_back_to_comma_split() {
        let names = extract_names("Aspirin, Metoprolol, Lisinopril", &SuffixLemmatizer, true);
        assert_eq!(names, ["Aspirin", "Metoprolol", "Lisinopril"]);
    }

    #[test]
    fn bare_newline_list_is_the_last_resort() {
        let names = extract_names(
            "Aspirin\nLisinopril\n",
            &SuffixLemmatizer,
            true,
        );
        assert_eq!(names, ["Aspirin", "Lisinopril"]);
    }

    #[test]
    fn legacy_join_keeps_a_leading_space_per_name() {
        let names = extract_names("Aspirin, Lisinopril", &SuffixLemmatizer, false);
        assert_eq!(names, [" Aspirin", " Lisinopril"]);
    }

    #[test]
    fn stop_words_are_dropped_after_lemmatization() {
        // "tablets" only reaches the stop list through its base form "tablet".
        let names = extract_names(
            "Aspirin tablets, Lisinopril caps",
            &SuffixLemmatizer,
            true,
        );
        assert_eq!(names, ["Aspirin", "Lisinopril"]);
    }

    #[test]
    fn stub_lemmatizer_keeps_unreduced_plurals() {
        let names = extract_names("Aspirin tablets", &StubLemmatizer, true);
        assert_eq!(names, ["Aspirin tablets"]);
    }

    #[test]
    fn candidate_of_only_stop_words_is_dropped() {
        let names = extract_names("by mouth, Aspirin", &SuffixLemmatizer, true);
        assert_eq!(names, ["Aspirin"]);
    }
}
