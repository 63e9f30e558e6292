// src/grammar.rs
//
// Ordered regex rule set for grammar, spacing, punctuation and capitalization,
// plus medical subject-verb agreement and the long-sentence heuristic.
// Rules run as a fold: each rule sees the output of the previous one.

use crate::lexical::{capitalize, preserve_case};
use crate::substitution::find_tokens;
use crate::types::{ErrorRecord, ErrorType, Position};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Confidence for the long-sentence advisory
pub const SENTENCE_STRUCTURE_CONFIDENCE: f64 = 0.75;

/// One detect-and-rewrite rule.
/// `rewrite` returns `None` to leave a match alone.
pub struct RegexRule {
    pub name: &'static str,
    pub pattern: &'static Lazy<Regex>,
    pub error_type: ErrorType,
    pub confidence: f64,
    pub description: Option<&'static str>,
    pub rewrite: fn(&Captures) -> Option<String>,
}

impl RegexRule {
    /// Rewrite matches left to right, recording each change.
    ///
    /// A record's `original` is the shortest run of whole tokens around the
    /// match that occurs once in the text at that point, so replaying the
    /// records in order with `apply_correction` gives the same result.
    /// Patterns must not match the empty string.
    pub fn run(&self, text: &str) -> (String, Vec<ErrorRecord>) {
        let mut current = text.to_string();
        let mut errors = Vec::new();
        let mut cursor = 0;

        while let Some(caps) = self.pattern.captures_at(&current, cursor) {
            let (start, end, rewritten) = match (caps.get(0), (self.rewrite)(&caps)) {
                (Some(whole), Some(rewritten)) if rewritten != whole.as_str() => {
                    (whole.start(), whole.end(), rewritten)
                }
                (Some(whole), _) => {
                    cursor = whole.end();
                    continue;
                }
                (None, _) => break,
            };

            let (span_start, span_end) = unique_span(&current, start, end);
            let suggestion = format!(
                "{}{}{}",
                &current[span_start..start],
                rewritten,
                &current[end..span_end]
            );
            let record = ErrorRecord::new(
                &current[span_start..span_end],
                suggestion,
                self.error_type,
                self.confidence,
                Position::chars(span_start, span_end),
            );
            errors.push(match self.description {
                Some(description) => {
                    record.with_message(format!("{}: {}", self.error_type.category(), description))
                }
                None => record,
            });

            current.replace_range(start..end, &rewritten);
            cursor = start + rewritten.len();
        }

        (current, errors)
    }
}

/// Smallest run of whole tokens covering `start..end` that occurs once in `text`
fn unique_span(text: &str, start: usize, end: usize) -> (usize, usize) {
    let tokens: Vec<(usize, usize)> = NON_SPACE.find_iter(text).map(|m| (m.start(), m.end())).collect();
    let last = match tokens.len().checked_sub(1) {
        Some(last) => last,
        None => return (start, end),
    };

    let mut first = tokens.iter().position(|t| t.1 > start).unwrap_or(last);
    if tokens[first].0 > start && first > 0 {
        first -= 1;
    }
    let mut final_token = tokens.iter().rposition(|t| t.0 < end).unwrap_or(0).max(first);
    if tokens[final_token].1 < end && final_token < last {
        final_token += 1;
    }

    loop {
        let span = (tokens[first].0.min(start), tokens[final_token].1.max(end));
        let unique = find_tokens(text, &text[span.0..span.1]).map_or(false, |found| found == [span]);
        if unique {
            return span;
        }
        if first > 0 {
            first -= 1;
        } else if final_token < last {
            final_token += 1;
        } else {
            return span;
        }
    }
}

/// Run `rules` in order, collecting records and threading the text through
pub fn run_rules(rules: &[RegexRule], text: &str) -> (String, Vec<ErrorRecord>) {
    let mut current = text.to_string();
    let mut errors = Vec::new();

    for rule in rules {
        let (rewritten, found) = rule.run(&current);
        if found.is_empty() {
            continue;
        }
        debug!("[Rules] rule '{}' matched {} time(s)", rule.name, found.len());
        errors.extend(found);
        current = rewritten;
    }

    (current, errors)
}

// Nouns that take "an" and that reports often get wrong
const VOWEL_NOUNS: &str = "effusion|effusions|inflammation|obstruction|opacity|opacification|enlargement|\
abscess|aneurysm|artery|area|edema|infiltrate|irregularity|ulcer|occlusion|abnormality|\
infarct|infarction|embolus|echo|osteophyte|erosion|incidental|increase|interval|impression|\
anomaly|atelectasis|ileus|ostium|orbit|organ|ovary";

pub(crate) static MULTIPLE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

pub(crate) static MISSING_TERMINAL_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+)([)"'\]]*)$"#).unwrap());

static THERE_IS_PLURAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(there)(\s+)(is)(\s+)(\w+)\b").unwrap());

static LOWERCASE_AFTER_STOP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?])(\s+)([a-z]\w*)").unwrap());

static ARTICLE_BEFORE_VOWEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b([aA])(\s+)((?i:{}))\b", VOWEL_NOUNS)).unwrap()
});

static PLURAL_NOUN_WAS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(findings|lesions|opacities|masses)(\s+)(was)\b").unwrap());

static SINGULAR_NOUN_WERE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(finding|lesion|opacity|mass)(\s+)(were)\b").unwrap());

static NON_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

pub(crate) fn collapse_spaces(_: &Captures) -> Option<String> {
    Some(" ".to_string())
}

pub(crate) fn add_terminal_period(caps: &Captures) -> Option<String> {
    Some(format!("{}{}.", &caps[1], &caps[2]))
}

fn there_are(caps: &Captures) -> Option<String> {
    let noun = caps[5].to_lowercase();
    let plural = noun.len() > 2
        && noun.ends_with('s')
        && !noun.ends_with("ss")
        && !noun.ends_with("us")
        && !noun.ends_with("is");
    if !plural {
        return None;
    }
    Some(format!(
        "{}{}{}{}{}",
        &caps[1],
        &caps[2],
        preserve_case(&caps[3], "are"),
        &caps[4],
        &caps[5]
    ))
}

fn capitalize_after_stop(caps: &Captures) -> Option<String> {
    Some(format!("{}{}{}", &caps[1], &caps[2], capitalize(&caps[3])))
}

fn article_an(caps: &Captures) -> Option<String> {
    let article = if &caps[1] == "A" { "An" } else { "an" };
    Some(format!("{}{}{}", article, &caps[2], &caps[3]))
}

fn verb_were(caps: &Captures) -> Option<String> {
    Some(format!("{}{}{}", &caps[1], &caps[2], preserve_case(&caps[3], "were")))
}

fn verb_was(caps: &Captures) -> Option<String> {
    Some(format!("{}{}{}", &caps[1], &caps[2], preserve_case(&caps[3], "was")))
}

/// General grammar rules, in application order
pub static GRAMMAR_RULES: &[RegexRule] = &[
    RegexRule {
        name: "multiple-spaces",
        pattern: &MULTIPLE_SPACES,
        error_type: ErrorType::Spacing,
        confidence: 0.95,
        description: Some("multiple spaces collapsed to one"),
        rewrite: collapse_spaces,
    },
    RegexRule {
        name: "missing-terminal-period",
        pattern: &MISSING_TERMINAL_PERIOD,
        error_type: ErrorType::Punctuation,
        confidence: 0.9,
        description: None,
        rewrite: add_terminal_period,
    },
    RegexRule {
        name: "there-is-plural",
        pattern: &THERE_IS_PLURAL,
        error_type: ErrorType::Grammar,
        confidence: 0.8,
        description: None,
        rewrite: there_are,
    },
    RegexRule {
        name: "capitalize-after-stop",
        pattern: &LOWERCASE_AFTER_STOP,
        error_type: ErrorType::Capitalization,
        confidence: 0.9,
        description: None,
        rewrite: capitalize_after_stop,
    },
    RegexRule {
        name: "article-before-vowel",
        pattern: &ARTICLE_BEFORE_VOWEL,
        error_type: ErrorType::Grammar,
        confidence: 0.85,
        description: None,
        rewrite: article_an,
    },
];

/// Subject-verb agreement for nouns that dominate report findings
pub static MEDICAL_GRAMMAR_RULES: &[RegexRule] = &[
    RegexRule {
        name: "plural-noun-was",
        pattern: &PLURAL_NOUN_WAS,
        error_type: ErrorType::Grammar,
        confidence: 0.85,
        description: Some("plural subject takes \"were\""),
        rewrite: verb_were,
    },
    RegexRule {
        name: "singular-noun-were",
        pattern: &SINGULAR_NOUN_WERE,
        error_type: ErrorType::Grammar,
        confidence: 0.85,
        description: Some("singular subject takes \"was\""),
        rewrite: verb_was,
    },
];

/// Grammar phase: general rules, medical agreement, then the sentence-length advisory
#[derive(Debug, Clone)]
pub struct GrammarChecker {
    pub long_sentence_words: usize,
}

impl Default for GrammarChecker {
    fn default() -> Self {
        Self { long_sentence_words: 30 }
    }
}

impl GrammarChecker {
    pub fn new(long_sentence_words: usize) -> Self {
        Self { long_sentence_words }
    }

    /// Corrected text and every record, advisory ones included
    pub fn check(&self, text: &str) -> (String, Vec<ErrorRecord>) {
        let (after_general, mut errors) = run_rules(GRAMMAR_RULES, text);
        let (corrected, medical) = run_rules(MEDICAL_GRAMMAR_RULES, &after_general);
        errors.extend(medical);
        errors.extend(self.analyze_sentence_structure(&corrected));
        (corrected, errors)
    }

    /// Long sentences with no comma or semicolon; reported, never applied
    pub fn analyze_sentence_structure(&self, text: &str) -> Vec<ErrorRecord> {
        SENTENCE_SPLIT
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
            .filter_map(|(index, sentence)| {
                let words: Vec<&str> = sentence.split_whitespace().collect();
                if words.len() <= self.long_sentence_words || sentence.contains([',', ';']) {
                    return None;
                }
                let (first, second) = words.split_at(words.len() / 2);
                let suggestion = format!("{}. {}", first.join(" "), capitalize(&second.join(" ")));
                Some(
                    ErrorRecord::new(
                        sentence,
                        suggestion,
                        ErrorType::Grammar,
                        SENTENCE_STRUCTURE_CONFIDENCE,
                        Position::sentence(index),
                    )
                    .with_message(format!(
                        "Grammar: sentence has {} words without a break; consider splitting it",
                        words.len()
                    ))
                    .advisory(),
                )
            })
            .collect()
    }
}

/// Grammar records for `text` with default settings
pub fn detect_grammar_errors(text: &str) -> Vec<ErrorRecord> {
    GrammarChecker::default().check(text).1
}

/// Agreement records only
pub fn detect_medical_grammar_patterns(text: &str) -> Vec<ErrorRecord> {
    run_rules(MEDICAL_GRAMMAR_RULES, text).1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(errors: &[ErrorRecord]) -> Vec<(String, String, ErrorType)> {
        errors
            .iter()
            .map(|e| (e.original.clone(), e.suggestion.clone(), e.error_type))
            .collect()
    }

    #[test]
    fn test_spacing_and_terminal_period() {
        let (text, errors) = GrammarChecker::default().check("Mild  edema noted");
        assert_eq!(text, "Mild edema noted.");
        assert_eq!(
            pairs(&errors),
            vec![
                ("Mild  edema".to_string(), "Mild edema".to_string(), ErrorType::Spacing),
                ("noted".to_string(), "noted.".to_string(), ErrorType::Punctuation),
            ]
        );
        assert_eq!(errors[0].message, "Spacing: multiple spaces collapsed to one");
    }

    #[test]
    fn test_terminal_period_after_closing_paren() {
        let (text, _) = GrammarChecker::default().check("Stable (unchanged)");
        assert_eq!(text, "Stable (unchanged).");
        let (text, errors) = GrammarChecker::default().check("Stable.");
        assert_eq!(text, "Stable.");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_there_is_plural() {
        let (text, errors) = GrammarChecker::default().check("There is nodules in the lung.");
        assert_eq!(text, "There are nodules in the lung.");
        assert_eq!(errors[0].original, "There is nodules");

        let (text, _) = GrammarChecker::default().check("There is atelectasis. There is a mass.");
        assert_eq!(text, "There is atelectasis. There is a mass.");
    }

    #[test]
    fn test_capitalization_after_stop() {
        let (text, errors) = GrammarChecker::default().check("No fracture. the lungs are clear.");
        assert_eq!(text, "No fracture. The lungs are clear.");
        assert_eq!(errors[0].original, "fracture. the");
        assert_eq!(errors[0].suggestion, "fracture. The");
        assert_eq!(errors[0].error_type, ErrorType::Capitalization);
    }

    #[test]
    fn test_terminal_period_on_repeated_word() {
        let (text, errors) = GrammarChecker::default().check("Stable nodule. Otherwise stable");
        assert_eq!(text, "Stable nodule. Otherwise stable.");
        assert_eq!(
            pairs(&errors),
            vec![(
                "Otherwise stable".to_string(),
                "Otherwise stable.".to_string(),
                ErrorType::Punctuation
            )]
        );
        assert_eq!(errors[0].position.start, 15);
    }

    #[test]
    fn test_rule_records_replay_to_rule_output() {
        let input = "the lesion were small.the  lesion were stable. the lesion were seen";
        let (text, errors) = GrammarChecker::default().check(input);
        let mut replayed = input.to_string();
        for error in errors.iter().filter(|e| e.changes_text()) {
            assert_eq!(find_tokens(&replayed, &error.original).unwrap().len(), 1, "{:?}", error.original);
            replayed = crate::substitution::apply_correction(&replayed, &error.original, &error.suggestion).unwrap();
        }
        assert_eq!(replayed, text);
    }

    #[test]
    fn test_article_correction() {
        let (text, errors) = GrammarChecker::default().check("A effusion and a opacity. A nodule.");
        assert_eq!(text, "An effusion and an opacity. A nodule.");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.confidence == 0.85));
    }

    #[test]
    fn test_medical_agreement() {
        let errors = detect_medical_grammar_patterns("The findings was stable. The lesion were small.");
        assert_eq!(
            pairs(&errors),
            vec![
                ("findings was".to_string(), "findings were".to_string(), ErrorType::Grammar),
                ("lesion were".to_string(), "lesion was".to_string(), ErrorType::Grammar),
            ]
        );
        assert!(detect_medical_grammar_patterns("The findings were stable.").is_empty());
    }

    #[test]
    fn test_long_sentence_is_advisory() {
        let sentence = vec!["word"; 32].join(" ");
        let checker = GrammarChecker::default();
        let (text, errors) = checker.check(&format!("{}.", sentence));

        assert_eq!(text, format!("{}.", sentence));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].advisory);
        assert!(!errors[0].changes_text());
        assert_eq!(errors[0].confidence, SENTENCE_STRUCTURE_CONFIDENCE);
        assert!(errors[0].suggestion.contains("word. Word"));

        let with_comma = format!("{}, word.", sentence);
        assert!(checker.analyze_sentence_structure(&with_comma).is_empty());
        assert!(GrammarChecker::new(40).analyze_sentence_structure(&sentence).is_empty());
    }

    #[test]
    fn test_clean_report_has_no_grammar_errors() {
        let text = "Assessment of the bladder malignancy is not feasible with FDG PET due to urinary activity.\n\nNo evidence of locoregional nodal deposits.";
        assert!(detect_grammar_errors(text).is_empty());
    }
}
