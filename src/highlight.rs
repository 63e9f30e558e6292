// src/highlight.rs
//
// HTML renderers for the two review modes.
// Step mode keeps the original wording and numbers each error; corrected mode
// shows the suggestion with a check badge. Both escape the text and build the
// output in one left-to-right pass over claimed spans, so markers never nest.

use crate::lexical::preserve_case;
use crate::substitution::find_replaceable;
use crate::types::{ErrorRecord, ErrorType};
use lazy_static::lazy_static;
use log::{debug, warn};
use std::collections::HashMap;

/// Legend colour for types missing from the scheme
pub const DEFAULT_COLOR: &str = "#f8f9fa";

lazy_static! {
    /// Background colour per error type, for markers and the UI legend
    pub static ref COLOR_SCHEME: HashMap<ErrorType, &'static str> = {
        let mut m = HashMap::new();
        m.insert(ErrorType::Grammar, "#fff3cd");
        m.insert(ErrorType::Spelling, "#f8d7da");
        m.insert(ErrorType::Abbreviation, "#d1ecf1");
        m.insert(ErrorType::Enhancement, "#d4edda");
        m.insert(ErrorType::Punctuation, "#e2e3e5");
        m.insert(ErrorType::Capitalization, "#ffeaa7");
        m.insert(ErrorType::Spacing, "#e2e3e5");
        m.insert(ErrorType::Medical, "#e7f3ff");
        m.insert(ErrorType::PhraseImprovement, "#d4edda");
        m.insert(ErrorType::Verified, "#d4edda");
        m
    };
}

pub fn color_for(error_type: ErrorType) -> &'static str {
    COLOR_SCHEME.get(&error_type).copied().unwrap_or(DEFAULT_COLOR)
}

/// Hover and badge styling shared by both modes
pub const HIGHLIGHT_STYLE: &str = "<style>\
.error-highlight{padding:2px 4px;border-radius:3px;cursor:help;position:relative;}\
.step-error{border-bottom:2px solid #dc3545;}\
.step-indicator{display:inline-block;min-width:1.2em;margin-right:3px;padding:0 4px;border-radius:8px;\
background:#dc3545;color:#fff;font-size:0.75em;font-weight:bold;text-align:center;}\
.error-highlight:hover::after{content:attr(title);position:absolute;left:0;top:100%;z-index:10;\
white-space:nowrap;padding:4px 8px;border-radius:4px;background:#333;color:#fff;font-size:0.8em;}\
.correction-highlight{background-color:#d4edda;padding:2px 4px;border-radius:3px;cursor:help;}\
.correction-badge{display:inline-block;margin-right:3px;color:#28a745;font-weight:bold;}\
</style>";

/// Escape text for element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// A span of the text owned by one record
#[derive(Debug, Clone, Copy)]
struct Claim {
    start: usize,
    end: usize,
    record: usize,
}

/// Claim the occurrences substitution would touch, in detection order; earlier claims win.
/// Corrected mode only claims records that change the text.
fn claim_occurrences(text: &str, errors: &[ErrorRecord], corrected_mode: bool) -> Vec<Claim> {
    let mut claims: Vec<Claim> = Vec::new();

    for (index, error) in errors.iter().enumerate() {
        if error.original.trim().is_empty() || (corrected_mode && !error.changes_text()) {
            continue;
        }

        let spans = match find_replaceable(text, &error.original, &error.suggestion) {
            Ok(spans) => spans,
            Err(e) => {
                warn!("[Highlighter] Skipping '{}': {}", error.original, e);
                continue;
            }
        };

        for (start, end) in spans {
            let overlaps = claims.iter().any(|c| start < c.end && c.start < end);
            if !overlaps {
                claims.push(Claim { start, end, record: index });
            }
        }
    }

    claims.sort_by_key(|c| c.start);
    claims
}

/// Stitch escaped text and markers together
fn render_claims(text: &str, claims: &[Claim], mut marker: impl FnMut(&Claim, &str) -> String) -> String {
    let mut html = String::with_capacity(text.len() * 2);
    let mut last = 0;
    for claim in claims {
        html.push_str(&escape_html(&text[last..claim.start]));
        html.push_str(&marker(claim, &text[claim.start..claim.end]));
        last = claim.end;
    }
    html.push_str(&escape_html(&text[last..]));
    html
}

/// Renders highlighted HTML in either review mode
#[derive(Debug, Clone)]
pub struct HighlightRenderer {
    pub include_style_block: bool,
}

impl Default for HighlightRenderer {
    fn default() -> Self {
        Self { include_style_block: true }
    }
}

impl HighlightRenderer {
    pub fn new(include_style_block: bool) -> Self {
        Self { include_style_block }
    }

    fn prefix(&self) -> &'static str {
        if self.include_style_block { HIGHLIGHT_STYLE } else { "" }
    }

    /// Original wording with numbered error markers.
    /// Steps follow detection order and count only records that mark something.
    pub fn render_step_by_step(&self, text: &str, errors: &[ErrorRecord]) -> String {
        let claims = claim_occurrences(text, errors, false);

        let mut steps: HashMap<usize, usize> = HashMap::new();
        for index in 0..errors.len() {
            if claims.iter().any(|c| c.record == index) {
                let next = steps.len() + 1;
                steps.insert(index, next);
            }
        }
        debug!("[Highlighter] {} step marker(s) for {} record(s)", claims.len(), steps.len());

        let body = render_claims(text, &claims, |claim, matched| {
            let error = &errors[claim.record];
            let step = steps.get(&claim.record).copied().unwrap_or_default();
            let title = format!(
                "{}: \"{}\" → \"{}\"",
                error.error_type.as_str().to_uppercase(),
                error.original,
                error.suggestion
            );
            format!(
                "<span class=\"error-highlight step-error\" data-step=\"{step}\" data-error-type=\"{kind}\" \
data-suggestion=\"{suggestion}\" title=\"{title}\" style=\"background-color: {color};\">\
<span class=\"step-indicator\">{step}</span>{text}</span>",
                step = step,
                kind = error.error_type.as_str(),
                suggestion = escape_html(&error.suggestion),
                title = escape_html(&title),
                color = color_for(error.error_type),
                text = escape_html(matched),
            )
        });

        format!("{}{}", self.prefix(), body)
    }

    /// Corrected wording, each replacement wrapped in a badge marker
    pub fn render_corrected(&self, text: &str, errors: &[ErrorRecord]) -> String {
        let claims = claim_occurrences(text, errors, true);

        let body = render_claims(text, &claims, |claim, matched| {
            let error = &errors[claim.record];
            let replacement = if matched == error.original {
                error.suggestion.clone()
            } else {
                preserve_case(matched, &error.suggestion)
            };
            let title = format!("CORRECTED: \"{}\" → \"{}\"", error.original, error.suggestion);
            format!(
                "<span class=\"correction-highlight\" data-original=\"{original}\" data-error-type=\"{kind}\" \
title=\"{title}\"><span class=\"correction-badge\">✓</span>{text}</span>",
                original = escape_html(&error.original),
                kind = error.error_type.as_str(),
                title = escape_html(&title),
                text = escape_html(&replacement),
            )
        });

        format!("{}{}", self.prefix(), body)
    }
}

/// Step-mode HTML with the default style block
pub fn render_step_by_step_highlights(text: &str, errors: &[ErrorRecord]) -> String {
    HighlightRenderer::default().render_step_by_step(text, errors)
}

/// Corrected-mode HTML with the default style block
pub fn render_corrected_highlights(text: &str, errors: &[ErrorRecord]) -> String {
    HighlightRenderer::default().render_corrected(text, errors)
}
