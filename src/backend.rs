// src/backend.rs
//
// Wire types for the remote correction service and the adapter that turns
// its newest version into the same AnalysisResult the local pipeline returns.

use crate::corrector::{apply_records, confidence_for};
use crate::highlight::HighlightRenderer;
use crate::types::{AnalysisResult, ErrorRecord, ErrorType, Phase, PhaseLog, Summary};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body posted to the correction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRequest {
    pub record_id: String,
    pub report_text: String,
}

impl CorrectionRequest {
    pub fn new(record_id: impl Into<String>, report_text: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            report_text: report_text.into(),
        }
    }
}

/// One stored correction pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectionVersion {
    #[serde(default)]
    pub corrections: Vec<ErrorRecord>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResponse {
    #[serde(default)]
    pub versions: Vec<CorrectionVersion>,
    #[serde(default)]
    pub findings: Option<String>,
    #[serde(default)]
    pub confidence_score: f64,
}

impl CorrectionResponse {
    /// Newest version by timestamp; untimestamped versions rank oldest, later entries win ties
    pub fn latest_version(&self) -> Option<&CorrectionVersion> {
        self.versions.iter().max_by_key(|v| v.created_at)
    }

    pub fn into_analysis(self, report_text: &str) -> AnalysisResult {
        self.to_analysis(report_text, &HighlightRenderer::default())
    }

    /// Apply the newest version's corrections to `report_text` and render the step view
    pub fn to_analysis(&self, report_text: &str, renderer: &HighlightRenderer) -> AnalysisResult {
        if report_text.trim().is_empty() {
            return AnalysisResult::empty();
        }

        let errors: Vec<ErrorRecord> = match self.latest_version() {
            Some(version) => version.corrections.clone(),
            None => {
                warn!("[Backend] Response carried no versions");
                Vec::new()
            }
        };

        let mut corrections: BTreeMap<Phase, PhaseLog> =
            Phase::ALL.iter().map(|p| (*p, PhaseLog::default())).collect();
        let mut counts: BTreeMap<Phase, usize> = BTreeMap::new();
        for error in &errors {
            let phase = error.error_type.phase();
            *counts.entry(phase).or_insert(0) += 1;
            if let Some(log) = corrections.get_mut(&phase) {
                log.explain.push(error.message.clone());
            }
        }

        let corrected_text = match self.findings.as_deref() {
            Some(findings) if errors.is_empty() && !findings.trim().is_empty() => findings.to_string(),
            _ => apply_records(report_text.trim(), &errors),
        };

        let highlights: Vec<ErrorRecord> = errors
            .iter()
            .filter(|e| e.error_type != ErrorType::Formatting)
            .cloned()
            .collect();
        let highlighted_html = renderer.render_step_by_step(report_text, &highlights);

        let confidence = if self.confidence_score > 0.0 {
            self.confidence_score.clamp(0.0, 1.0)
        } else {
            confidence_for(errors.len(), report_text.split_whitespace().count())
        };

        let count = |phase: Phase| counts.get(&phase).copied().unwrap_or(0);
        let summary = Summary {
            total_errors: errors.len(),
            spelling_errors: count(Phase::Spelling),
            grammar_errors: count(Phase::Grammar),
            medical_errors: count(Phase::Medical),
            formatting_errors: count(Phase::Formatting),
            production_ready: errors.is_empty() || confidence > 0.85,
        };

        info!(
            "[Backend] Adapted {} correction(s) from {} version(s)",
            errors.len(),
            self.versions.len()
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
}
