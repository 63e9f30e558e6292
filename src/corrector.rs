// src/corrector.rs
//
// Runs the four correction phases in order and assembles the analysis result.
// Each phase detects against the output of the previous one:
// spelling -> grammar -> medical -> formatting.

use crate::config::AnalyzerSettings;
use crate::formatting::apply_formatting;
use crate::grammar::GrammarChecker;
use crate::highlight::HighlightRenderer;
use crate::lexical::SpellingScanner;
use crate::medical::{detect_medical_errors, detect_medical_phrase_improvements};
use crate::substitution::apply_correction;
use crate::types::{AnalysisResult, ErrorRecord, ErrorType, Phase, PhaseLog, Summary};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;

/// Banded confidence from the error rate per word of the original text
pub fn confidence_for(error_count: usize, word_count: usize) -> f64 {
    if error_count == 0 {
        return 1.0;
    }
    if word_count == 0 {
        return 0.6;
    }

    let rate = error_count as f64 / word_count as f64;
    match rate {
        r if r < 0.02 => 0.95,
        r if r < 0.05 => 0.90,
        r if r < 0.10 => 0.80,
        r if r < 0.15 => 0.70,
        _ => 0.60,
    }
}

/// Fold records into `text` by whole-token substitution, in detection order.
/// Advisory and no-op records are skipped, as is any record whose pattern fails.
pub fn apply_records(text: &str, records: &[ErrorRecord]) -> String {
    records
        .iter()
        .filter(|r| r.changes_text())
        .fold(text.to_string(), |current, record| {
            match apply_correction(&current, &record.original, &record.suggestion) {
                Ok(next) => next,
                Err(e) => {
                    warn!("[Corrector] Skipping '{}': {}", record.original, e);
                    current
                }
            }
        })
}

fn explain(records: &[ErrorRecord]) -> PhaseLog {
    PhaseLog {
        explain: records
            .iter()
            .map(|r| {
                if r.advisory {
                    format!("{} (advisory, not applied)", r.message)
                } else {
                    r.message.clone()
                }
            })
            .collect(),
    }
}

/// Runs the full correction pipeline with one set of settings
#[derive(Debug, Clone)]
pub struct ReportAnalyzer {
    settings: AnalyzerSettings,
    scanner: SpellingScanner,
    grammar: GrammarChecker,
    renderer: HighlightRenderer,
}

impl Default for ReportAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerSettings::default())
    }
}

impl ReportAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self {
            scanner: SpellingScanner::new(
                settings.spelling.english_max_distance,
                settings.spelling.medical_min_similarity,
            ),
            grammar: GrammarChecker::new(settings.long_sentence_words),
            renderer: HighlightRenderer::new(settings.include_style_block),
            settings,
        }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    pub fn renderer(&self) -> &HighlightRenderer {
        &self.renderer
    }

    /// Analyze a report. Blank input gives an empty result.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("[Corrector] Empty input, nothing to analyze");
            return AnalysisResult::empty();
        }

        let start_time = Instant::now();
        let offset = text.len() - text.trim_start().len();

        let spelling = self.scanner.detect_spelling_errors(trimmed, offset);
        let after_spelling = apply_records(trimmed, &spelling);
        debug!("[Corrector] Spelling phase: {} error(s)", spelling.len());

        let (after_grammar, grammar) = self.grammar.check(&after_spelling);
        debug!("[Corrector] Grammar phase: {} error(s)", grammar.len());

        let mut medical = detect_medical_errors(&after_grammar, self.settings.report_verified_terms);
        medical.extend(detect_medical_phrase_improvements(&after_grammar));
        let after_medical = apply_records(&after_grammar, &medical);
        debug!("[Corrector] Medical phase: {} error(s)", medical.len());

        let (corrected_text, formatting) = apply_formatting(&after_medical);
        debug!("[Corrector] Formatting phase: {} fix(es)", formatting.len());

        let mut corrections = BTreeMap::new();
        corrections.insert(Phase::Spelling, explain(&spelling));
        corrections.insert(Phase::Grammar, explain(&grammar));
        corrections.insert(Phase::Medical, explain(&medical));
        corrections.insert(Phase::Formatting, explain(&formatting));

        let summary_counts = (spelling.len(), grammar.len(), medical.len(), formatting.len());
        let errors: Vec<ErrorRecord> = spelling
            .into_iter()
            .chain(grammar)
            .chain(medical)
            .chain(formatting)
            .collect();

        let highlights: Vec<ErrorRecord> = errors
            .iter()
            .filter(|e| e.error_type != ErrorType::Formatting)
            .cloned()
            .collect();
        let highlighted_html = self.renderer.render_step_by_step(text, &highlights);

        let confidence = confidence_for(errors.len(), text.split_whitespace().count());
        let summary = Summary {
            total_errors: errors.len(),
            spelling_errors: summary_counts.0,
            grammar_errors: summary_counts.1,
            medical_errors: summary_counts.2,
            formatting_errors: summary_counts.3,
            production_ready: errors.is_empty() || confidence > self.settings.production_ready_confidence,
        };

        let duration = start_time.elapsed();
        if duration.as_millis() > 50 {
            warn!("[Corrector] Analysis took {}ms for {} chars", duration.as_millis(), text.len());
        }
        info!(
            "[Corrector] Analysis complete: {} error(s), {} highlighted, confidence {:.2}",
            errors.len(),
            highlights.len(),
            confidence
        );

        AnalysisResult {
            errors,
            corrections,
            highlighted_html,
            corrected_text,
            confidence,
            summary,
        }
    }

    /// Analyze a JSON value; anything but a string gives an empty result
    pub fn analyze_value(&self, value: &Value) -> AnalysisResult {
        match value.as_str() {
            Some(text) => self.analyze(text),
            None => {
                debug!("[Corrector] Non-string input ({}), nothing to analyze", value);
                AnalysisResult::empty()
            }
        }
    }
}

/// Analyze with default settings
pub fn analyze_text(text: &str) -> AnalysisResult {
    ReportAnalyzer::default().analyze(text)
}

/// Analyze a JSON value with default settings
pub fn analyze_value(value: &Value) -> AnalysisResult {
    ReportAnalyzer::default().analyze_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{render_corrected_highlights, render_step_by_step_highlights, HIGHLIGHT_STYLE};
    use crate::substitution::find_replaceable;
    use regex::Regex;
    use serde_json::json;

    const SAMPLE_REPORT: &str = "Assessment of the bladder malignancy is not feasible with FDG PET due to urinary activity.\n\nNo evidence of locoregional nodal depositssss.\n\nThe photopenic focus adjacent to the aortic arch is unlikely to represent metastases.";

    const MIXED_REPORTS: &[&str] = &[
        SAMPLE_REPORT,
        "There is nodules in the lung. the heart is normal",
        "Stable nodule. Otherwise stable",
        "Pt is stable ,no change.",
        "Mild  edema noted. A effusion is seen",
        "FDG avid focus. Prior FDG (fluorodeoxyglucose) study.",
        "The findings was stable. Unremarkable. Unremarkable.",
    ];

    fn visible_text(html: &str) -> String {
        let without_style = html.replace(HIGHLIGHT_STYLE, "");
        let markers = Regex::new(r#"<span class="(step-indicator|correction-badge)">[^<]*</span>"#).unwrap();
        let tags = Regex::new(r"<[^>]+>").unwrap();
        tags.replace_all(&markers.replace_all(&without_style, ""), "")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_sample_report_end_to_end() {
        let result = analyze_text(SAMPLE_REPORT);
        let highlights = result.highlights();

        let pairs: Vec<_> = highlights
            .iter()
            .map(|e| (e.original.as_str(), e.suggestion.as_str(), e.error_type))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("depositssss", "deposits", ErrorType::Spelling),
                ("FDG", "FDG (fluorodeoxyglucose)", ErrorType::Abbreviation),
                ("PET", "PET (positron emission tomography)", ErrorType::Abbreviation),
            ]
        );
        assert_eq!(result.errors.len(), 3);

        assert!(result.corrected_text.contains("FDG (fluorodeoxyglucose) PET (positron emission tomography)"));
        assert!(result.corrected_text.contains("nodal deposits."));
        assert!(!result.corrected_text.contains("depositssss"));

        for html in [&result.highlighted_html, &render_corrected_highlights(SAMPLE_REPORT, &highlights)] {
            assert!(html.contains("Assessment of the bladder"));
            assert!(html.contains("The photopenic focus"));
            assert!(!html.contains("data-original=\"Assessment\""));
            assert!(!html.contains("data-original=\"photopenic\""));
        }
        assert_eq!(result.highlighted_html.matches("class=\"step-indicator\"").count(), 3);

        assert_eq!(result.summary.spelling_errors, 1);
        assert_eq!(result.summary.medical_errors, 2);
        assert_eq!(result.summary.grammar_errors, 0);
        assert_eq!(result.summary.formatting_errors, 0);
        assert_eq!(result.confidence, 0.80);
        assert!(!result.summary.production_ready);
    }

    #[test]
    fn test_correction_converges() {
        let first = analyze_text(SAMPLE_REPORT);
        let second = analyze_text(&first.corrected_text);

        assert!(second
            .errors
            .iter()
            .all(|e| !matches!(e.error_type, ErrorType::Spelling | ErrorType::Medical | ErrorType::Abbreviation)));
        assert_eq!(second.corrected_text, first.corrected_text);
    }

    #[test]
    fn test_case_preserved_for_capitalized_misspelling() {
        let result = analyze_text("Pnuemonia in the left lower lobe.");
        assert_eq!(result.errors[0].suggestion, "Pneumonia");
        assert!(result.corrected_text.starts_with("Pneumonia in the left lower lobe"));
    }

    #[test]
    fn test_legitimate_doubles_untouched() {
        let result = analyze_text("Less fluid is seen.");
        assert!(result.errors.is_empty());
        assert_eq!(result.corrected_text, "Less fluid is seen.");
        assert_eq!(result.confidence, 1.0);
        assert!(result.summary.production_ready);
    }

    #[test]
    fn test_empty_and_non_string_input() {
        for result in [
            analyze_text(""),
            analyze_text("   \n "),
            analyze_value(&json!(null)),
            analyze_value(&json!(42)),
        ] {
            assert!(result.errors.is_empty());
            assert!(result.corrections.is_empty());
            assert_eq!(result.confidence, 0.0);
            assert_eq!(result.corrected_text, "");
            assert_eq!(result.highlighted_html, "");
        }
        assert_eq!(analyze_value(&json!("Stable.")).corrected_text, "Stable.");
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(confidence_for(0, 100), 1.0);
        assert_eq!(confidence_for(1, 51), 0.95);
        assert_eq!(confidence_for(1, 40), 0.90);
        assert_eq!(confidence_for(1, 12), 0.80);
        assert_eq!(confidence_for(1, 7), 0.70);
        assert_eq!(confidence_for(16, 100), 0.60);
    }

    #[test]
    fn test_grammar_and_formatting_phases() {
        let result = analyze_text("There is nodules in the lung. the heart is normal");
        assert_eq!(result.corrected_text, "There are nodules in the lung. The heart is normal.");

        let grammar_log = &result.corrections[&Phase::Grammar].explain;
        assert_eq!(grammar_log.len(), 3);
        assert!(result.corrections[&Phase::Formatting].explain.is_empty());
    }

    #[test]
    fn test_formatting_fixes_are_not_highlighted() {
        let result = analyze_text("Pt is stable ,no change.");
        assert!(result.errors.iter().any(|e| e.error_type == ErrorType::Formatting));
        assert!(result.highlights().iter().all(|e| e.error_type != ErrorType::Formatting));
        assert_eq!(result.corrected_text, "Patient is stable,no change.");
        assert!(!result.highlighted_html.contains("data-error-type=\"formatting\""));
    }

    #[test]
    fn test_spelling_positions_index_untrimmed_input() {
        let text = "  Pnuemonia noted.";
        let result = analyze_text(text);
        let position = result.errors[0].position;
        assert_eq!(&text[position.start..position.end], "Pnuemonia");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let value = serde_json::to_value(analyze_text("Pt stable.")).unwrap();
        assert!(value.get("highlightedHtml").is_some());
        assert!(value.get("correctedText").is_some());
        assert!(value["summary"].get("productionReady").is_some());
        assert!(value["corrections"].get("medical").is_some());
    }

    #[test]
    fn test_repeated_last_word_gets_one_marker() {
        let text = "Stable nodule. Otherwise stable";
        let result = analyze_text(text);
        let highlights = result.highlights();

        assert_eq!(result.corrected_text, "Stable nodule. Otherwise stable.");
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].original, "Otherwise stable");
        assert_eq!(result.highlighted_html.matches("class=\"step-indicator\"").count(), 1);
        assert_eq!(visible_text(&render_corrected_highlights(text, &highlights)), result.corrected_text);
    }

    #[test]
    fn test_expanded_abbreviation_left_alone_in_every_view() {
        let text = "FDG avid focus. Prior FDG (fluorodeoxyglucose) study.";
        let result = analyze_text(text);
        let highlights = result.highlights();

        assert_eq!(
            result.corrected_text,
            "FDG (fluorodeoxyglucose) avid focus. Prior FDG (fluorodeoxyglucose) study."
        );
        assert_eq!(visible_text(&render_corrected_highlights(text, &highlights)), result.corrected_text);
        assert_eq!(render_step_by_step_highlights(text, &highlights).matches("class=\"step-indicator\"").count(), 1);
    }

    #[test]
    fn test_records_replay_each_phase() {
        let analyzer = ReportAnalyzer::default();
        for &report in MIXED_REPORTS {
            let result = analyzer.analyze(report);
            let trimmed = report.trim();

            let mut current = trimmed.to_string();
            for error in result.errors.iter().filter(|e| e.changes_text()) {
                if matches!(error.error_type.phase(), Phase::Grammar | Phase::Formatting) {
                    let spans = find_replaceable(&current, &error.original, &error.suggestion).unwrap();
                    assert_eq!(spans.len(), 1, "{:?} in {:?}", error.original, current);
                }
                current = apply_correction(&current, &error.original, &error.suggestion).unwrap();
            }
            assert_eq!(current, result.corrected_text, "{}", report);
            assert_eq!(apply_records(trimmed, &result.errors), result.corrected_text);

            let by_phase = |phase: Phase| -> Vec<ErrorRecord> {
                result.errors.iter().filter(|e| e.error_type.phase() == phase).cloned().collect()
            };
            let after_spelling = apply_records(trimmed, &by_phase(Phase::Spelling));
            let (after_grammar, _) = analyzer.grammar.check(&after_spelling);
            assert_eq!(apply_records(&after_spelling, &by_phase(Phase::Grammar)), after_grammar);
            let after_medical = apply_records(&after_grammar, &by_phase(Phase::Medical));
            assert_eq!(
                apply_records(&after_medical, &by_phase(Phase::Formatting)),
                apply_formatting(&after_medical).0
            );
        }
    }

    #[test]
    fn test_views_agree_with_pipeline() {
        for &report in MIXED_REPORTS {
            let result = analyze_text(report);
            let highlights = result.highlights();

            assert_eq!(visible_text(&result.highlighted_html), report, "{}", report);
            if result.summary.formatting_errors == 0 {
                assert_eq!(
                    visible_text(&render_corrected_highlights(report, &highlights)),
                    result.corrected_text,
                    "{}",
                    report
                );
            }
        }
    }
}
