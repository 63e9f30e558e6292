//! MediXScan: spelling, grammar, terminology and formatting checks for
//! radiology report text, with HTML review highlighting.

pub mod backend;
pub mod config;
pub mod corrector;
pub mod english_words;
pub mod error;
pub mod formatting;
pub mod grammar;
pub mod highlight;
pub mod lexical;
pub mod medical;
pub mod medical_terms;
pub mod misspellings;
pub mod recommendations;
pub mod substitution;
pub mod types;

pub use config::AnalyzerSettings;
pub use corrector::{analyze_text, analyze_value, ReportAnalyzer};
pub use error::{ConfigError, CorrectionError};
pub use highlight::{
    color_for, render_corrected_highlights, render_step_by_step_highlights, HighlightRenderer,
    COLOR_SCHEME,
};
pub use recommendations::{generate_recommendations, Recommendation};
pub use types::{
    filter_by_type, AnalysisResult, ErrorRecord, ErrorType, Phase, PhaseLog, Position, PositionUnit,
    Summary,
};
