// src/substitution.rs
//
// Whole-token, case-insensitive find and replace.
// Shared by the corrector and both highlight renderers so that a record
// always touches exactly the occurrences it was detected from.

use crate::error::{CorrectionError, Result};
use crate::lexical::preserve_case;
use regex::{Regex, RegexBuilder};

/// Characters that glue onto a token; a match next to one of these is not whole
pub fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '/'
}

/// Case-insensitive pattern for `original`, with any whitespace run matching any other
pub fn token_pattern(original: &str) -> Result<Regex> {
    let pieces: Vec<String> = original.split_whitespace().map(regex::escape).collect();
    if pieces.is_empty() {
        return Err(CorrectionError::BlankOriginal);
    }

    RegexBuilder::new(&pieces.join(r"\s+"))
        .case_insensitive(true)
        .build()
        .map_err(|source| CorrectionError::Pattern {
            original: original.to_string(),
            source,
        })
}

/// Byte spans of every whole-token occurrence of `original` in `text`
pub fn find_tokens(text: &str, original: &str) -> Result<Vec<(usize, usize)>> {
    let pattern = token_pattern(original)?;
    let trimmed = original.trim();
    let check_start = trimmed.chars().next().map_or(false, is_token_char);
    let check_end = trimmed.chars().last().map_or(false, is_token_char);

    let spans = pattern
        .find_iter(text)
        .filter(|m| {
            let before_ok = !check_start
                || text[..m.start()].chars().last().map_or(true, |c| !is_token_char(c));
            let after_ok = !check_end
                || text[m.end()..].chars().next().map_or(true, |c| !is_token_char(c));
            before_ok && after_ok
        })
        .map(|m| (m.start(), m.end()))
        .collect();

    Ok(spans)
}

/// Occurrence at `start` already reads as `suggestion`, e.g. `FDG (fluorodeoxyglucose)`
fn already_expanded(text: &str, start: usize, end: usize, suggestion: &str) -> bool {
    suggestion.len() > end - start
        && text[start..]
            .get(..suggestion.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(suggestion))
}

/// Whole-token occurrences of `original` that substitution would change.
/// Occurrences already followed by their expansion are skipped.
pub fn find_replaceable(text: &str, original: &str, suggestion: &str) -> Result<Vec<(usize, usize)>> {
    let spans = find_tokens(text, original)?;
    Ok(spans
        .into_iter()
        .filter(|&(start, end)| !already_expanded(text, start, end, suggestion))
        .collect())
}

/// Replace every replaceable occurrence of `original` with `suggestion`.
///
/// An exact-case match takes the suggestion verbatim; other matches get the
/// suggestion in their own casing.
pub fn apply_correction(text: &str, original: &str, suggestion: &str) -> Result<String> {
    let spans = find_replaceable(text, original, suggestion)?;
    let mut result = String::with_capacity(text.len() + suggestion.len());
    let mut last = 0;

    for (start, end) in spans {
        let matched = &text[start..end];
        result.push_str(&text[last..start]);
        if matched == original {
            result.push_str(suggestion);
        } else {
            result.push_str(&preserve_case(matched, suggestion));
        }
        last = end;
    }

    result.push_str(&text[last..]);
    Ok(result)
}
