//! The serializer: query model in, boolean string out.
//!
//! Pure and deterministic - no I/O, no clock, no randomness. The skip
//! policy is deliberate and matches the shipped behavior: a disabled or
//! empty bucket contributes nothing at all, including its operator, so the
//! previous active bucket's operator joins across the gap.

use crate::model::{Bucket, OutputMode};

/// Format a single term for output:
/// - trims whitespace
/// - wraps multi-word phrases in double quotes unless already quoted
///
/// Already-quoted values pass through untouched - no re-quoting, no
/// escaping of embedded quotes.
pub fn format_term(raw: &str) -> String {
    let term = raw.trim();
    if term.is_empty() {
        return String::new();
    }

    let already_quoted = term.len() >= 2 && term.starts_with('"') && term.ends_with('"');
    let has_whitespace = term.chars().any(char::is_whitespace);

    if has_whitespace && !already_quoted {
        return format!("\"{term}\"");
    }

    term.to_string()
}

/// Build the final boolean string from buckets + mode.
///
/// - filters out disabled or empty buckets
/// - ORs within each bucket, group wrapped in parentheses
/// - joins groups with the *previous* active bucket's `operator_after`
/// - no outer parentheses around the whole expression
pub fn build_boolean(buckets: &[Bucket], mode: OutputMode) -> String {
    let active: Vec<&Bucket> = buckets
        .iter()
        .filter(|b| b.is_enabled && !b.terms.is_empty())
        .collect();

    if active.is_empty() {
        return String::new();
    }

    let mut parts: Vec<String> = Vec::new();

    for (i, bucket) in active.iter().enumerate() {
        let formatted: Vec<String> = bucket
            .terms
            .iter()
            .map(|t| format_term(&t.value))
            .filter(|t| !t.is_empty())
            .collect();

        // Should not occur given term invariants, skipped defensively.
        if formatted.is_empty() {
            continue;
        }

        let group = format!("({})", formatted.join(" OR "));

        if parts.is_empty() {
            parts.push(group);
        } else {
            // Operator comes from the previous active bucket.
            parts.push(active[i - 1].operator_after.as_str().to_string());
            parts.push(group);
        }
    }

    match mode {
        OutputMode::Minified => parts.join(" "),
        OutputMode::Pretty => parts.join("\n"),
    }
}
