// src/recommendations.rs
//
// Reviewer-facing summaries built from an error list:
// grouped recommendations, report completeness, statistics and a word diff.

use crate::highlight::escape_html;
use crate::types::{ErrorRecord, ErrorType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Examples listed per recommendation
const MAX_EXAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub message: String,
    pub action: String,
    pub examples: Vec<String>,
}

fn of_type<'a>(errors: &'a [ErrorRecord], types: &'a [ErrorType]) -> impl Iterator<Item = &'a ErrorRecord> {
    errors.iter().filter(move |e| types.contains(&e.error_type))
}

fn change_examples(errors: &[ErrorRecord], types: &[ErrorType]) -> Vec<String> {
    of_type(errors, types)
        .take(MAX_EXAMPLES)
        .map(|e| format!("\"{}\" → \"{}\"", e.original, e.suggestion))
        .collect()
}

fn message_examples(errors: &[ErrorRecord], types: &[ErrorType]) -> Vec<String> {
    of_type(errors, types).take(MAX_EXAMPLES).map(|e| e.message.clone()).collect()
}

/// Group errors by type into advisory recommendations, most important first
pub fn generate_recommendations(errors: &[ErrorRecord]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let count = |types: &[ErrorType]| of_type(errors, types).count();

    let terminology = [ErrorType::Spelling, ErrorType::Medical];
    let n = count(&terminology);
    if n > 0 {
        recommendations.push(Recommendation {
            category: "Medical Terminology".to_string(),
            priority: Priority::High,
            message: format!("Detected {} potential spelling or medical terminology error(s).", n),
            action: "Verify medical terminology against standard medical dictionaries.".to_string(),
            examples: change_examples(errors, &terminology),
        });
    }

    let n = count(&[ErrorType::Abbreviation]);
    if n > 0 {
        recommendations.push(Recommendation {
            category: "Medical Abbreviations".to_string(),
            priority: Priority::Medium,
            message: format!(
                "Found {} medical abbreviation(s) that should be expanded for clarity in formal reports.",
                n
            ),
            action: "Consider expanding abbreviations in formal medical documentation.".to_string(),
            examples: change_examples(errors, &[ErrorType::Abbreviation]),
        });
    }

    if count(&[ErrorType::Grammar]) > 0 {
        recommendations.push(Recommendation {
            category: "Grammar Check".to_string(),
            priority: Priority::Medium,
            message: "Review subject-verb agreement and sentence structure for clarity.".to_string(),
            action: "Check grammar rules and ensure proper sentence construction.".to_string(),
            examples: message_examples(errors, &[ErrorType::Grammar]),
        });
    }

    if count(&[ErrorType::PhraseImprovement]) > 0 {
        recommendations.push(Recommendation {
            category: "Medical Phrasing".to_string(),
            priority: Priority::Medium,
            message: "Consider using more formal medical language for professional reports.".to_string(),
            action: "Replace informal medical abbreviations with complete terms.".to_string(),
            examples: message_examples(errors, &[ErrorType::PhraseImprovement]),
        });
    }

    let n = count(&[ErrorType::Enhancement]);
    if n > 0 {
        recommendations.push(Recommendation {
            category: "Medical Context Enhancement".to_string(),
            priority: Priority::Low,
            message: format!("Found {} term(s) that could benefit from additional medical context.", n),
            action: "Consider adding anatomical or diagnostic context to improve clarity.".to_string(),
            examples: change_examples(errors, &[ErrorType::Enhancement]),
        });
    }

    if count(&[ErrorType::Punctuation, ErrorType::Spacing]) > 0 {
        recommendations.push(Recommendation {
            category: "Punctuation".to_string(),
            priority: Priority::Low,
            message: "Ensure proper punctuation and spacing for clear medical documentation.".to_string(),
            action: "Review punctuation rules, especially around medical terminology.".to_string(),
            examples: message_examples(errors, &[ErrorType::Punctuation, ErrorType::Spacing]),
        });
    }

    if count(&[ErrorType::Capitalization]) > 0 {
        recommendations.push(Recommendation {
            category: "Capitalization".to_string(),
            priority: Priority::Low,
            message: "Proper capitalization enhances document professionalism.".to_string(),
            action: "Capitalize words at the beginning of sentences and proper nouns.".to_string(),
            examples: message_examples(errors, &[ErrorType::Capitalization]),
        });
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

/// A standard radiology report section missing from the text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessIssue {
    pub section: String,
    pub message: String,
    pub priority: Priority,
}

const ESSENTIAL_SECTIONS: &[(&str, &[&str])] = &[
    ("Clinical indication", &["indication", "clinical"]),
    ("Imaging technique", &["technique", "method"]),
    ("Findings", &["finding", "observation"]),
    ("Impression/Conclusion", &["impression", "conclusion"]),
];

/// Sections with none of their keywords anywhere in the report
pub fn validate_report_completeness(text: &str) -> Vec<CompletenessIssue> {
    let lower = text.to_lowercase();
    ESSENTIAL_SECTIONS
        .iter()
        .filter(|(_, keywords)| !keywords.iter().any(|k| lower.contains(k)))
        .map(|(section, _)| CompletenessIssue {
            section: section.to_string(),
            message: format!("Consider adding {} section to improve report completeness", section),
            priority: Priority::Medium,
        })
        .collect()
}

/// Completeness issues folded into a single recommendation
pub fn completeness_recommendation(text: &str) -> Option<Recommendation> {
    let issues = validate_report_completeness(text);
    if issues.is_empty() {
        return None;
    }
    Some(Recommendation {
        category: "Report Completeness".to_string(),
        priority: Priority::Medium,
        message: "Consider adding essential sections to improve report completeness.".to_string(),
        action: "Review medical report structure guidelines.".to_string(),
        examples: issues.into_iter().map(|i| i.message).collect(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorStatistics {
    pub total: usize,
    pub by_type: BTreeMap<ErrorType, usize>,
    pub average_confidence: f64,
}

pub fn error_statistics(errors: &[ErrorRecord]) -> ErrorStatistics {
    let mut stats = ErrorStatistics { total: errors.len(), ..Default::default() };
    for error in errors {
        *stats.by_type.entry(error.error_type).or_insert(0) += 1;
        stats.average_confidence += error.confidence;
    }
    if !errors.is_empty() {
        stats.average_confidence /= errors.len() as f64;
    }
    stats
}

/// One piece of a word-level diff; whitespace runs are pieces too
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSegment {
    Same(String),
    Removed(String),
    Added(String),
}

static WORD_OR_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+|\S+").unwrap());

fn pieces(text: &str) -> Vec<&str> {
    WORD_OR_SPACE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Greedy word diff: on a mismatch, skip ahead on whichever side resyncs sooner
pub fn word_diff(original: &str, corrected: &str) -> Vec<DiffSegment> {
    let left = pieces(original);
    let right = pieces(corrected);
    let mut diff = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < left.len() || j < right.len() {
        if i >= left.len() {
            diff.push(DiffSegment::Added(right[j].to_string()));
            j += 1;
        } else if j >= right.len() {
            diff.push(DiffSegment::Removed(left[i].to_string()));
            i += 1;
        } else if left[i] == right[j] {
            diff.push(DiffSegment::Same(left[i].to_string()));
            i += 1;
            j += 1;
        } else {
            let left_later = right[j..].iter().position(|p| *p == left[i]);
            let right_later = left[i..].iter().position(|p| *p == right[j]);
            match (left_later, right_later) {
                (Some(a), b) if b.map_or(true, |b| a < b) => {
                    diff.push(DiffSegment::Added(right[j].to_string()));
                    j += 1;
                }
                (_, Some(_)) => {
                    diff.push(DiffSegment::Removed(left[i].to_string()));
                    i += 1;
                }
                _ => {
                    diff.push(DiffSegment::Removed(left[i].to_string()));
                    diff.push(DiffSegment::Added(right[j].to_string()));
                    i += 1;
                    j += 1;
                }
            }
        }
    }

    diff
}

/// Side-by-side HTML for the original and corrected report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonHtml {
    pub original_html: String,
    pub corrected_html: String,
}

pub fn comparison_html(original: &str, corrected: &str) -> ComparisonHtml {
    let mut original_html = String::new();
    let mut corrected_html = String::new();

    for segment in word_diff(original, corrected) {
        match segment {
            DiffSegment::Removed(value) => original_html.push_str(&format!(
                "<span class=\"diff-removed\" style=\"background-color: #f8d7da; text-decoration: line-through;\">{}</span>",
                escape_html(&value)
            )),
            DiffSegment::Added(value) => corrected_html.push_str(&format!(
                "<span class=\"diff-added\" style=\"background-color: #d4edda; font-weight: bold;\">{}</span>",
                escape_html(&value)
            )),
            DiffSegment::Same(value) => {
                let escaped = escape_html(&value);
                original_html.push_str(&escaped);
                corrected_html.push_str(&escaped);
            }
        }
    }

    ComparisonHtml { original_html, corrected_html }
}
