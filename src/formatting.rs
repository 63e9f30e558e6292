// src/formatting.rs
//
// Final cleanup pass run after medical substitution.
// These fixes reach the corrected text and the explain log but are never highlighted.

use crate::grammar::{add_terminal_period, collapse_spaces, run_rules, RegexRule, MISSING_TERMINAL_PERIOD, MULTIPLE_SPACES};
use crate::types::{ErrorRecord, ErrorType};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MISSING_SPACE_AFTER_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])\.([A-Z][a-z])").unwrap());

static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w)[ \t]+([,.;:!?])").unwrap());

fn space_after_period(caps: &Captures) -> Option<String> {
    Some(format!("{}. {}", &caps[1], &caps[2]))
}

fn join_punctuation(caps: &Captures) -> Option<String> {
    Some(format!("{}{}", &caps[1], &caps[2]))
}

pub static FORMATTING_RULES: &[RegexRule] = &[
    RegexRule {
        name: "multiple-spaces",
        pattern: &MULTIPLE_SPACES,
        error_type: ErrorType::Formatting,
        confidence: 0.95,
        description: Some("multiple spaces"),
        rewrite: collapse_spaces,
    },
    RegexRule {
        name: "missing-space-after-period",
        pattern: &MISSING_SPACE_AFTER_PERIOD,
        error_type: ErrorType::Formatting,
        confidence: 0.9,
        description: Some("missing space after period"),
        rewrite: space_after_period,
    },
    RegexRule {
        name: "space-before-punctuation",
        pattern: &SPACE_BEFORE_PUNCTUATION,
        error_type: ErrorType::Formatting,
        confidence: 0.9,
        description: Some("space before punctuation"),
        rewrite: join_punctuation,
    },
    RegexRule {
        name: "missing-terminal-period",
        pattern: &MISSING_TERMINAL_PERIOD,
        error_type: ErrorType::Formatting,
        confidence: 0.85,
        description: Some("missing terminal period"),
        rewrite: add_terminal_period,
    },
];

/// Formatting records for `text`
pub fn detect_formatting_errors(text: &str) -> Vec<ErrorRecord> {
    run_rules(FORMATTING_RULES, text).1
}

/// `text` with every formatting rule applied
pub fn apply_formatting(text: &str) -> (String, Vec<ErrorRecord>) {
    run_rules(FORMATTING_RULES, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_rules() {
        let (text, errors) = apply_formatting("Lungs clear.Heart normal , no effusion");
        assert_eq!(text, "Lungs clear. Heart normal, no effusion.");
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.error_type == ErrorType::Formatting));
        assert_eq!(errors[0].message, "Formatting: missing space after period");
    }

    #[test]
    fn test_clean_text_untouched() {
        let text = "FDG (fluorodeoxyglucose) uptake is normal.";
        assert!(detect_formatting_errors(text).is_empty());
        assert_eq!(apply_formatting(text).0, text);
    }
}
