// src/medical.rs
//
// Medical term and phrase matching over whitespace tokens.
// Multi-word entries are tried before single words and consume the words they match.

use crate::lexical::{capitalize, preserve_case};
use crate::medical_terms::{self, MedicalTerm};
use crate::types::{ErrorRecord, ErrorType, Position};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Confidence for a phrase-improvement hit
pub const PHRASE_IMPROVEMENT_CONFIDENCE: f64 = 0.8;

/// Longest key in the terms table, in words
const MAX_PHRASE_WORDS: usize = 3;

static STRIP_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s'/]").unwrap());

static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Token with punctuation stripped, in its own casing
fn clean_token(token: &str) -> String {
    STRIP_PUNCTUATION.replace_all(token, "").into_owned()
}

/// Table casing, capitalized when the text capitalizes a lowercase entry
fn suggestion_casing(original: &str, term: &MedicalTerm) -> String {
    let original_upper = original.chars().next().map_or(false, |c| c.is_uppercase());
    let table_lower = term.correct.chars().next().map_or(false, |c| c.is_lowercase());
    if original_upper && table_lower {
        capitalize(term.correct)
    } else {
        term.correct.to_string()
    }
}

/// Abbreviations kept in front of their own expansion, e.g. `FDG (fluorodeoxyglucose)`
fn already_expanded(raw_tokens: &[&str], index: usize, key: &str, term: &MedicalTerm) -> bool {
    let correct = term.correct.to_lowercase();
    if !correct.starts_with(&format!("{} ", key)) {
        return false;
    }
    let following = raw_tokens[index..].join(" ").to_lowercase();
    following.starts_with(&correct)
}

/// Abbreviations, misspellings, verified terms and enhancements found in `text`.
/// Verified terms are only reported when `report_verified` is set.
pub fn detect_medical_errors(text: &str, report_verified: bool) -> Vec<ErrorRecord> {
    let raw_tokens: Vec<&str> = text.split_whitespace().collect();
    let cleaned: Vec<String> = raw_tokens.iter().map(|t| clean_token(t)).collect();
    let lowered: Vec<String> = cleaned.iter().map(|t| t.to_lowercase()).collect();

    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let mut i = 0;

    while i < raw_tokens.len() {
        if lowered[i].chars().count() < 2 {
            i += 1;
            continue;
        }

        let hit = (1..=MAX_PHRASE_WORDS)
            .rev()
            .filter(|n| i + n <= raw_tokens.len())
            .find_map(|n| {
                let key = lowered[i..i + n].join(" ");
                medical_terms::lookup(&key).map(|term| (n, key, term))
            });

        let Some((width, key, term)) = hit else {
            i += 1;
            continue;
        };

        if term.kind == ErrorType::Verified && !report_verified {
            debug!("[Medical] '{}' is a verified term", key);
        } else if term.kind == ErrorType::Abbreviation && already_expanded(&raw_tokens, i, &key, &term) {
            debug!("[Medical] '{}' already carries its expansion", key);
        } else if seen.insert(key.clone()) {
            let original = cleaned[i..i + width].join(" ");
            let suggestion = suggestion_casing(&original, &term);
            errors.push(ErrorRecord::new(
                original,
                suggestion,
                term.kind,
                term.confidence,
                Position::words(i, i + width - 1),
            ));
        }

        i += width;
    }

    errors
}

/// Whole sentences that have a more formal phrasing.
/// A repeated sentence is reported once, at its first index.
pub fn detect_medical_phrase_improvements(text: &str) -> Vec<ErrorRecord> {
    let mut seen = HashSet::new();
    SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .filter_map(|(index, sentence)| {
            let key = sentence.to_lowercase();
            let improved = medical_terms::phrase_improvement(&key)?;
            if !seen.insert(key) {
                debug!("[Medical] Phrase '{}' already reported", sentence);
                return None;
            }
            Some(ErrorRecord::new(
                sentence,
                preserve_case(sentence, improved),
                ErrorType::PhraseImprovement,
                PHRASE_IMPROVEMENT_CONFIDENCE,
                Position::sentence(index),
            ))
        })
        .collect()
}
