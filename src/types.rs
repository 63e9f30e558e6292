// src/types.rs
//
// Shared data model: error records, positions and the analysis result.
// Incoming records may come from the local analyzer or from the remote
// correction service, so deserialization accepts both field spellings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of issue an error record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorType {
    Spelling,
    Grammar,
    #[serde(alias = "medical_terminology")]
    Medical,
    Abbreviation,
    Enhancement,
    Punctuation,
    Capitalization,
    Spacing,
    Formatting,
    #[serde(alias = "phrase_improvement")]
    PhraseImprovement,
    Verified,
    #[serde(other)]
    Other,
}

impl ErrorType {
    pub const ALL: [ErrorType; 12] = [
        ErrorType::Spelling,
        ErrorType::Grammar,
        ErrorType::Medical,
        ErrorType::Abbreviation,
        ErrorType::Enhancement,
        ErrorType::Punctuation,
        ErrorType::Capitalization,
        ErrorType::Spacing,
        ErrorType::Formatting,
        ErrorType::PhraseImprovement,
        ErrorType::Verified,
        ErrorType::Other,
    ];

    /// Wire name, as used in `data-error-type` attributes and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Spelling => "spelling",
            ErrorType::Grammar => "grammar",
            ErrorType::Medical => "medical",
            ErrorType::Abbreviation => "abbreviation",
            ErrorType::Enhancement => "enhancement",
            ErrorType::Punctuation => "punctuation",
            ErrorType::Capitalization => "capitalization",
            ErrorType::Spacing => "spacing",
            ErrorType::Formatting => "formatting",
            ErrorType::PhraseImprovement => "phrase-improvement",
            ErrorType::Verified => "verified",
            ErrorType::Other => "other",
        }
    }

    /// Human-readable category used as the message prefix
    pub fn category(&self) -> &'static str {
        match self {
            ErrorType::Spelling => "Spelling",
            ErrorType::Grammar => "Grammar",
            ErrorType::Medical => "Medical term",
            ErrorType::Abbreviation => "Medical abbreviation",
            ErrorType::Enhancement => "Medical enhancement",
            ErrorType::Punctuation => "Punctuation",
            ErrorType::Capitalization => "Capitalization",
            ErrorType::Spacing => "Spacing",
            ErrorType::Formatting => "Formatting",
            ErrorType::PhraseImprovement => "Medical phrase improvement",
            ErrorType::Verified => "Verified medical term",
            ErrorType::Other => "Other",
        }
    }

    /// Phase that normally produces this type; used for records from outside the pipeline
    pub fn phase(&self) -> Phase {
        match self {
            ErrorType::Spelling => Phase::Spelling,
            ErrorType::Grammar
            | ErrorType::Punctuation
            | ErrorType::Capitalization
            | ErrorType::Spacing => Phase::Grammar,
            ErrorType::Formatting => Phase::Formatting,
            ErrorType::Medical
            | ErrorType::Abbreviation
            | ErrorType::Enhancement
            | ErrorType::PhraseImprovement
            | ErrorType::Verified
            | ErrorType::Other => Phase::Medical,
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four sequential correction stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Spelling,
    Grammar,
    Medical,
    Formatting,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Spelling, Phase::Grammar, Phase::Medical, Phase::Formatting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Spelling => "spelling",
            Phase::Grammar => "grammar",
            Phase::Medical => "medical",
            Phase::Formatting => "formatting",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a position's `start`/`end` count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionUnit {
    /// Byte offsets into the text the detecting phase examined
    #[default]
    Char,
    /// Whitespace-token index
    Word,
    /// Sentence index
    Sentence,
}

/// Canonical position of an error record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawPosition")]
pub struct Position {
    pub start: usize,
    pub end: usize,
    pub unit: PositionUnit,
}

impl Position {
    pub fn chars(start: usize, end: usize) -> Self {
        Self { start, end, unit: PositionUnit::Char }
    }

    pub fn words(start: usize, end: usize) -> Self {
        Self { start, end, unit: PositionUnit::Word }
    }

    pub fn sentence(index: usize) -> Self {
        Self { start: index, end: index, unit: PositionUnit::Sentence }
    }
}

/// Every position shape the UI and backend have been seen to send
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPosition {
    Missing,
    Pair(usize, usize),
    Object {
        #[serde(default)]
        start: usize,
        #[serde(default)]
        end: usize,
        #[serde(default)]
        unit: PositionUnit,
    },
}

impl From<RawPosition> for Position {
    fn from(raw: RawPosition) -> Self {
        match raw {
            RawPosition::Missing => Position::default(),
            RawPosition::Pair(start, end) => Position::chars(start, end),
            RawPosition::Object { start, end, unit } => Position { start, end, unit },
        }
    }
}

fn default_error_type() -> ErrorType {
    ErrorType::Other
}

fn default_confidence() -> f64 {
    0.8
}

/// One detected issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawErrorRecord")]
pub struct ErrorRecord {
    pub original: String,
    pub suggestion: String,
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub confidence: f64,
    pub position: Position,
    pub message: String,
    /// Heuristic records are reported but never applied to the corrected text
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub advisory: bool,
}

/// Wire form of a record; any field may be missing or use the service's names
#[derive(Deserialize)]
struct RawErrorRecord {
    #[serde(default, alias = "error")]
    original: String,
    #[serde(default, alias = "correction")]
    suggestion: String,
    #[serde(rename = "type", alias = "error_type", default = "default_error_type")]
    error_type: ErrorType,
    #[serde(default = "default_confidence")]
    confidence: f64,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    message: String,
    #[serde(default)]
    advisory: bool,
}

impl From<RawErrorRecord> for ErrorRecord {
    fn from(raw: RawErrorRecord) -> Self {
        let mut record = ErrorRecord::new(raw.original, raw.suggestion, raw.error_type, raw.confidence, raw.position);
        if !raw.message.trim().is_empty() {
            record.message = raw.message;
        }
        record.advisory = raw.advisory;
        record
    }
}

impl ErrorRecord {
    /// Build a record with the standard `Category: "a" → "b"` message
    pub fn new(
        original: impl Into<String>,
        suggestion: impl Into<String>,
        error_type: ErrorType,
        confidence: f64,
        position: Position,
    ) -> Self {
        let original = original.into();
        let suggestion = suggestion.into();
        let message = format!("{}: \"{}\" → \"{}\"", error_type.category(), original, suggestion);
        Self {
            original,
            suggestion,
            error_type,
            confidence: confidence.clamp(0.0, 1.0),
            position,
            message,
            advisory: false,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn advisory(mut self) -> Self {
        self.advisory = true;
        self
    }

    /// True when applying this record would change the text
    pub fn changes_text(&self) -> bool {
        !self.advisory && !self.suggestion.is_empty() && self.suggestion != self.original
    }
}

/// Explanation log for one phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseLog {
    pub explain: Vec<String>,
}

/// Per-phase counts and the production-readiness verdict
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_errors: usize,
    pub spelling_errors: usize,
    pub grammar_errors: usize,
    pub medical_errors: usize,
    pub formatting_errors: usize,
    pub production_ready: bool,
}

/// Output of a full analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub errors: Vec<ErrorRecord>,
    pub corrections: BTreeMap<Phase, PhaseLog>,
    pub highlighted_html: String,
    pub corrected_text: String,
    pub confidence: f64,
    pub summary: Summary,
}

impl AnalysisResult {
    /// Result for empty or non-text input
    pub fn empty() -> Self {
        Self::default()
    }

    /// Records that are shown as highlights; formatting fixes stay silent
    pub fn highlights(&self) -> Vec<ErrorRecord> {
        self.errors
            .iter()
            .filter(|e| e.error_type != ErrorType::Formatting)
            .cloned()
            .collect()
    }
}

/// Keep only records of the given types, as the UI's type checkboxes do
pub fn filter_by_type(errors: &[ErrorRecord], types: &[ErrorType]) -> Vec<ErrorRecord> {
    errors
        .iter()
        .filter(|e| types.contains(&e.error_type))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_type_field_names() {
        let a: ErrorRecord = serde_json::from_str(
            r#"{"original": "pt", "suggestion": "patient", "type": "abbreviation"}"#,
        )
        .unwrap();
        let b: ErrorRecord = serde_json::from_str(
            r#"{"error": "pt", "correction": "patient", "error_type": "abbreviation"}"#,
        )
        .unwrap();

        assert_eq!(a.error_type, ErrorType::Abbreviation);
        assert_eq!(b.error_type, ErrorType::Abbreviation);
        assert_eq!(a.original, b.original);
        assert_eq!(a.suggestion, b.suggestion);
    }

    #[test]
    fn test_missing_message_gets_standard_text() {
        let record: ErrorRecord =
            serde_json::from_str(r#"{"error": "pt", "correction": "patient", "error_type": "abbreviation"}"#).unwrap();
        assert_eq!(record.message, "Medical abbreviation: \"pt\" → \"patient\"");

        let blank: ErrorRecord =
            serde_json::from_str(r#"{"original": "pt", "suggestion": "patient", "message": "  "}"#).unwrap();
        assert_eq!(blank.message, "Other: \"pt\" → \"patient\"");

        let kept: ErrorRecord =
            serde_json::from_str(r#"{"original": "pt", "message": "Expand shorthand", "advisory": true}"#).unwrap();
        assert_eq!(kept.message, "Expand shorthand");
        assert!(kept.advisory);
    }

    #[test]
    fn test_accepts_both_position_shapes() {
        let from_array: ErrorRecord =
            serde_json::from_str(r#"{"original": "x", "position": [4, 9]}"#).unwrap();
        let from_object: ErrorRecord =
            serde_json::from_str(r#"{"original": "x", "position": {"start": 4, "end": 9}}"#).unwrap();
        let from_null: ErrorRecord =
            serde_json::from_str(r#"{"original": "x", "position": null}"#).unwrap();

        assert_eq!(from_array.position, Position::chars(4, 9));
        assert_eq!(from_object.position, Position::chars(4, 9));
        assert_eq!(from_null.position, Position::default());
    }

    #[test]
    fn test_unknown_type_becomes_other() {
        let record: ErrorRecord =
            serde_json::from_str(r#"{"original": "is", "error_type": "consistency"}"#).unwrap();
        assert_eq!(record.error_type, ErrorType::Other);

        let medical: ErrorRecord =
            serde_json::from_str(r#"{"original": "x", "error_type": "medical_terminology"}"#).unwrap();
        assert_eq!(medical.error_type, ErrorType::Medical);
    }

    #[test]
    fn test_message_format_and_serialization() {
        let record = ErrorRecord::new("hx", "history", ErrorType::Abbreviation, 0.8, Position::words(2, 2));
        assert_eq!(record.message, "Medical abbreviation: \"hx\" → \"history\"");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "abbreviation");
        assert_eq!(json["position"]["unit"], "word");
        assert!(json.get("advisory").is_none());
        assert_eq!(
            serde_json::to_value(ErrorType::PhraseImprovement).unwrap(),
            "phrase-improvement"
        );
    }

    #[test]
    fn test_filter_by_type() {
        let errors = vec![
            ErrorRecord::new("a", "b", ErrorType::Spelling, 0.9, Position::default()),
            ErrorRecord::new("c", "d", ErrorType::Grammar, 0.9, Position::default()),
            ErrorRecord::new("e", "f", ErrorType::Abbreviation, 0.9, Position::default()),
        ];
        let kept = filter_by_type(&errors, &[ErrorType::Spelling, ErrorType::Abbreviation]);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| e.error_type != ErrorType::Grammar));
    }
}
