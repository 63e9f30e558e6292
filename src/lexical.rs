// src/lexical.rs
//
// Word-level spelling scanner.
// Each word goes through four checks in order and the first hit wins:
// repeated characters, known misspellings, dictionary validation, medical spelling.

use crate::english_words::{self, ENGLISH_WORDS};
use crate::medical_terms;
use crate::misspellings::{self, ENGLISH_MISSPELLING_CONFIDENCE, MEDICAL_MISSPELLING_CONFIDENCE};
use crate::types::{ErrorRecord, ErrorType, Position};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Confidence for a collapsed character run
pub const REPEATED_CHARACTER_CONFIDENCE: f64 = 0.95;

/// Confidence for a dictionary-validation hit
pub const DICTIONARY_CONFIDENCE: f64 = 0.85;

/// Letters that legitimately double in English
const DOUBLING_LETTERS: &[char] = &['l', 's', 'f', 'm', 'n', 'p', 't', 'e', 'o'];

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z]+").unwrap());

static CORRECTED_FORMS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| misspellings::corrected_forms().collect());

/// A word extracted from the text with its byte span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    /// Lowercase form used for lookups
    pub word: String,
    pub original_word: String,
    pub start: usize,
    pub end: usize,
}

/// A suggested replacement for a single word
#[derive(Debug, Clone, PartialEq)]
pub struct WordCorrection {
    pub suggestion: String,
    pub error_type: ErrorType,
    pub confidence: f64,
}

impl WordCorrection {
    fn spelling(suggestion: String, confidence: f64) -> Self {
        Self { suggestion, error_type: ErrorType::Spelling, confidence }
    }
}

/// Extract `[a-zA-Z]+` runs left to right
pub fn extract_words(text: &str) -> Vec<WordToken> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| WordToken {
            word: m.as_str().to_lowercase(),
            original_word: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// True for words the scanner must never change
pub fn is_known_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    english_words::is_english_word(&lower)
        || medical_terms::is_medical_vocabulary(&lower)
        || CORRECTED_FORMS.contains(lower.as_str())
}

/// Carry the casing pattern of `original` over to `suggestion`
pub fn preserve_case(original: &str, suggestion: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return suggestion.to_string();
    }

    if letters.iter().all(|c| c.is_uppercase()) && letters.len() > 1 {
        return suggestion.to_uppercase();
    }
    if letters.iter().all(|c| c.is_lowercase()) {
        return suggestion.to_lowercase();
    }
    if letters[0].is_uppercase() && letters[1..].iter().all(|c| c.is_lowercase()) {
        return capitalize(&suggestion.to_lowercase());
    }

    suggestion.to_string()
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse runs of three or more identical letters.
/// A run of a doubling letter keeps two letters when that spelling is a known word.
pub fn detect_repeated_characters(original_word: &str) -> Option<String> {
    let chars: Vec<char> = original_word.chars().collect();
    let mut runs = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let lower = chars[i].to_ascii_lowercase();
        let mut j = i + 1;
        while j < chars.len() && chars[j].to_ascii_lowercase() == lower {
            j += 1;
        }
        runs.push((chars[i], j - i));
        i = j;
    }

    if !runs.iter().any(|(c, len)| *len >= 3 && c.is_alphabetic()) {
        return None;
    }

    let collapse = |keep_double: bool| -> String {
        let mut out = String::with_capacity(original_word.len());
        for (c, len) in &runs {
            let keep = if *len >= 3 && c.is_alphabetic() {
                if keep_double && DOUBLING_LETTERS.contains(&c.to_ascii_lowercase()) { 2 } else { 1 }
            } else {
                *len
            };
            for _ in 0..keep {
                out.push(*c);
            }
        }
        out
    };

    let doubled = collapse(true);
    let single = collapse(false);
    let corrected = if doubled != single && is_known_word(&doubled) { doubled } else { single };

    Some(preserve_case(original_word, &corrected))
}

/// Exact lookup in the English, then the medical, misspelling table
pub fn detect_common_misspellings(word: &str, original_word: &str) -> Option<WordCorrection> {
    if let Some(correct) = misspellings::english_correction(word) {
        return Some(WordCorrection::spelling(
            preserve_case(original_word, correct),
            ENGLISH_MISSPELLING_CONFIDENCE,
        ));
    }
    misspellings::medical_correction(word).map(|correct| {
        WordCorrection::spelling(preserve_case(original_word, correct), MEDICAL_MISSPELLING_CONFIDENCE)
    })
}

/// Calculate Levenshtein distance between two strings
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let chars1: Vec<char> = s1.chars().collect();
    let chars2: Vec<char> = s2.chars().collect();
    let len1 = chars1.len();
    let len2 = chars2.len();

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if chars1[i - 1] == chars2[j - 1] { 0 } else { 1 };
            matrix[i][j] = std::cmp::min(
                std::cmp::min(
                    matrix[i - 1][j] + 1,     // deletion
                    matrix[i][j - 1] + 1,     // insertion
                ),
                matrix[i - 1][j - 1] + cost,  // substitution
            );
        }
    }

    matrix[len1][len2]
}

/// `1 - distance / longest length`, 1.0 for two empty strings
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / longest as f64
}

fn length_difference(a: &str, b: &str) -> usize {
    a.chars().count().abs_diff(b.chars().count())
}

/// Runs the per-word checks with tunable fuzzy limits
#[derive(Debug, Clone)]
pub struct SpellingScanner {
    pub english_max_distance: usize,
    pub medical_min_similarity: f64,
}

impl Default for SpellingScanner {
    fn default() -> Self {
        Self { english_max_distance: 2, medical_min_similarity: 0.8 }
    }
}

impl SpellingScanner {
    pub fn new(english_max_distance: usize, medical_min_similarity: f64) -> Self {
        Self { english_max_distance, medical_min_similarity }
    }

    /// Closest dictionary word for an unknown word longer than three letters
    pub fn validate_english_word(&self, word: &str, original_word: &str) -> Option<WordCorrection> {
        if word.chars().count() <= 3 || is_known_word(word) {
            return None;
        }

        let mut best: Option<(&str, usize)> = None;
        for &candidate in ENGLISH_WORDS {
            if length_difference(word, candidate) > 2 {
                continue;
            }
            let distance = levenshtein_distance(word, candidate);
            if distance <= self.english_max_distance && best.map_or(true, |(_, d)| distance < d) {
                best = Some((candidate, distance));
            }
        }

        best.map(|(candidate, _)| {
            WordCorrection::spelling(preserve_case(original_word, candidate), DICTIONARY_CONFIDENCE)
        })
    }

    /// Medical-table spelling check: exact misspelling key, then fuzzy match
    pub fn validate_medical_spelling(&self, word: &str, original_word: &str) -> Option<WordCorrection> {
        if let Some(term) = medical_terms::lookup(word) {
            if term.kind == ErrorType::Spelling {
                return Some(WordCorrection {
                    suggestion: preserve_case(original_word, term.correct),
                    error_type: ErrorType::Medical,
                    confidence: term.confidence,
                });
            }
        }

        if is_known_word(word) {
            return None;
        }

        let mut best: Option<(&str, f64)> = None;
        for (key, term) in medical_terms::fuzzy_candidates() {
            if key == word || length_difference(word, key) > 2 {
                continue;
            }
            let score = similarity(word, key);
            if score > self.medical_min_similarity && best.map_or(true, |(_, s)| score > s) {
                best = Some((term.correct, score));
            }
        }

        best.map(|(correct, score)| WordCorrection {
            suggestion: preserve_case(original_word, correct),
            error_type: ErrorType::Medical,
            confidence: score * 0.8,
        })
    }

    /// Run the four checks on one word; the first hit wins
    pub fn check_word(&self, token: &WordToken) -> Option<WordCorrection> {
        if token.word.len() < 2 || token.word.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        if let Some(collapsed) = detect_repeated_characters(&token.original_word) {
            return Some(WordCorrection::spelling(collapsed, REPEATED_CHARACTER_CONFIDENCE));
        }

        detect_common_misspellings(&token.word, &token.original_word)
            .or_else(|| self.validate_english_word(&token.word, &token.original_word))
            .or_else(|| self.validate_medical_spelling(&token.word, &token.original_word))
            .filter(|c| c.suggestion != token.original_word)
    }

    /// Spelling-phase records for `text`.
    /// Positions are byte spans into `text` shifted by `offset`.
    pub fn detect_spelling_errors(&self, text: &str, offset: usize) -> Vec<ErrorRecord> {
        let mut seen = HashSet::new();
        let mut errors = Vec::new();

        for token in extract_words(text) {
            if !seen.insert(token.original_word.clone()) {
                continue;
            }
            if let Some(correction) = self.check_word(&token) {
                errors.push(ErrorRecord::new(
                    token.original_word,
                    correction.suggestion,
                    correction.error_type,
                    correction.confidence,
                    Position::chars(offset + token.start, offset + token.end),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_words_positions() {
        let words = extract_words("No evidence, 12 nodes.");
        let found: Vec<_> = words.iter().map(|w| (w.word.as_str(), w.start, w.end)).collect();
        assert_eq!(found, vec![("no", 0, 2), ("evidence", 3, 11), ("nodes", 16, 21)]);
        assert_eq!(words[0].original_word, "No");
    }

    #[test]
    fn test_repeated_characters() {
        assert_eq!(detect_repeated_characters("depositssss"), Some("deposits".to_string()));
        assert_eq!(detect_repeated_characters("DEPOSITSSSS"), Some("DEPOSITS".to_string()));
        assert_eq!(detect_repeated_characters("Hellllo"), Some("Hello".to_string()));
        assert_eq!(detect_repeated_characters("lesssion"), Some("lesion".to_string()));
        assert_eq!(detect_repeated_characters("less"), None);
        assert_eq!(detect_repeated_characters("bladder"), None);
    }

    #[test]
    fn test_preserve_case() {
        assert_eq!(preserve_case("FDG", "fluorodeoxyglucose"), "FLUORODEOXYGLUCOSE");
        assert_eq!(preserve_case("pnuemonia", "Pneumonia"), "pneumonia");
        assert_eq!(preserve_case("Pnuemonia", "pneumonia"), "Pneumonia");
        assert_eq!(preserve_case("PeT", "positron"), "positron");
        assert_eq!(preserve_case("", "x"), "x");
    }

    #[test]
    fn test_common_misspellings() {
        let english = detect_common_misspellings("recieve", "Recieve").unwrap();
        assert_eq!(english.suggestion, "Receive");
        assert_eq!(english.confidence, ENGLISH_MISSPELLING_CONFIDENCE);

        let medical = detect_common_misspellings("pnuemonia", "Pnuemonia").unwrap();
        assert_eq!(medical.suggestion, "Pneumonia");
        assert_eq!(medical.confidence, MEDICAL_MISSPELLING_CONFIDENCE);

        assert!(detect_common_misspellings("pneumonia", "pneumonia").is_none());
    }

    #[test]
    fn test_levenshtein_and_similarity() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("same", "same"), 0);
        assert!((similarity("sepsys", "sepsis") - (1.0 - 1.0 / 6.0)).abs() < 1e-9);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_validate_english_word() {
        let scanner = SpellingScanner::default();

        let fixed = scanner.validate_english_word("evidense", "Evidense").unwrap();
        assert_eq!(fixed.suggestion, "Evidence");
        assert_eq!(fixed.confidence, DICTIONARY_CONFIDENCE);

        // Known and short words are left alone
        assert!(scanner.validate_english_word("photopenic", "photopenic").is_none());
        assert!(scanner.validate_english_word("teh", "teh").is_none());
        // Nothing within two edits
        assert!(scanner.validate_english_word("zzzzzzzz", "zzzzzzzz").is_none());
    }

    #[test]
    fn test_validate_medical_spelling() {
        let scanner = SpellingScanner::default();

        let exact = scanner.validate_medical_spelling("radiologic", "radiologic").unwrap();
        assert_eq!(exact.suggestion, "radiological");
        assert_eq!(exact.error_type, ErrorType::Medical);

        let fuzzy = scanner.validate_medical_spelling("sepsys", "sepsys").unwrap();
        assert_eq!(fuzzy.suggestion, "sepsis");
        assert!((fuzzy.confidence - (1.0 - 1.0 / 6.0) * 0.8).abs() < 1e-9);

        assert!(scanner.validate_medical_spelling("effusion", "effusion").is_none());
    }

    #[test]
    fn test_detect_spelling_errors_order_and_offsets() {
        let scanner = SpellingScanner::default();
        let errors = scanner.detect_spelling_errors("Pnuemonia with depositssss", 2);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].original, "Pnuemonia");
        assert_eq!(errors[0].suggestion, "Pneumonia");
        assert_eq!(errors[0].error_type, ErrorType::Spelling);
        assert_eq!(errors[0].position, Position::chars(2, 11));

        assert_eq!(errors[1].suggestion, "deposits");
        assert!(errors[1].confidence >= 0.95);
    }

    #[test]
    fn test_detect_spelling_errors_clean_text() {
        let scanner = SpellingScanner::default();
        let text = "The photopenic focus adjacent to the aortic arch is unlikely to represent metastases";
        assert!(scanner.detect_spelling_errors(text, 0).is_empty());
    }

    #[test]
    fn test_report_adverbs_are_not_fuzzy_matched() {
        let scanner = SpellingScanner::default();
        let text = "Opacities are seen bilaterally in the lateral aspect of the lung. Otherwise unremarkable.";
        assert!(scanner.detect_spelling_errors(text, 0).is_empty());
    }
}
