//! Dirty tracking against a saved baseline.
//!
//! The baseline is a canonical JSON snapshot of everything a save captures:
//! buckets, output mode, the rendered query string, and the display name.
//! While no baseline exists (before the first save or load), "dirty" means
//! "the model holds at least one term anywhere".

use serde::Serialize;

use crate::model::{Bucket, OutputMode, QueryModel};

#[derive(Serialize)]
struct Snapshot<'a> {
    buckets: &'a [Bucket],
    #[serde(rename = "outputMode")]
    output_mode: OutputMode,
    #[serde(rename = "queryString")]
    query_string: &'a str,
    name: &'a str,
}

/// Canonical snapshot string used as the dirty baseline. Field order is
/// fixed by the struct, so equal values always produce equal strings.
pub fn snapshot(model: &QueryModel, query_string: &str, name: &str) -> String {
    serde_json::to_string(&Snapshot {
        buckets: &model.buckets,
        output_mode: model.output_mode,
        query_string,
        name,
    })
    .unwrap_or_default()
}

/// At least one term somewhere in the model.
pub fn has_terms(model: &QueryModel) -> bool {
    model.buckets.iter().any(|b| !b.terms.is_empty())
}

/// Whether the builder holds anything worth saving: a term anywhere, a
/// non-blank bucket name, or a non-blank rendered query. Gates the save
/// operation.
pub fn has_content(model: &QueryModel, rendered: &str) -> bool {
    let bucket_has_content = model
        .buckets
        .iter()
        .any(|b| !b.terms.is_empty() || !b.name.trim().is_empty());
    bucket_has_content || !rendered.trim().is_empty()
}

/// Decide dirtiness relative to the baseline captured at the last save or
/// load. Comparison is by value through the canonical snapshot, never by
/// reference.
pub fn is_dirty(
    baseline: Option<&str>,
    model: &QueryModel,
    rendered: &str,
    name: &str,
) -> bool {
    match baseline {
        None => has_terms(model),
        Some(base) => snapshot(model, rendered, name) != base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_boolean;
    use crate::model::{OutputMode, QueryModel};

    #[test]
    fn without_baseline_dirty_means_terms_exist() {
        let empty = QueryModel::default();
        assert!(!is_dirty(None, &empty, "", ""));

        let with_term = empty.add_term("bucket-1", "x");
        assert!(is_dirty(None, &with_term, "(x)", ""));
    }

    #[test]
    fn content_counts_terms_names_and_rendered_string() {
        // The default bucket's "Bucket 1" name already counts as content,
        // matching the shipped builder; save is still gated on a non-blank
        // search name elsewhere.
        let model = QueryModel::default();
        assert!(has_content(&model, ""));

        let blank_names = model.rename_bucket("bucket-1", "  ");
        assert!(!has_content(&blank_names, ""));
        assert!(has_content(&blank_names, "(x)"));
        assert!(has_content(&blank_names.add_term("bucket-1", "x"), ""));
    }

    #[test]
    fn baseline_roundtrip_is_clean() {
        let model = QueryModel::default().add_term("bucket-1", "engineer");
        let rendered = build_boolean(&model.buckets, model.output_mode);
        let base = snapshot(&model, &rendered, "My search");
        assert!(!is_dirty(Some(&base), &model, &rendered, "My search"));
    }

    #[test]
    fn any_single_change_flips_dirty() {
        let model = QueryModel::default().add_term("bucket-1", "engineer");
        let rendered = build_boolean(&model.buckets, model.output_mode);
        let base = snapshot(&model, &rendered, "My search");

        let term_added = model.add_term("bucket-1", "developer");
        let new_rendered = build_boolean(&term_added.buckets, term_added.output_mode);
        assert!(is_dirty(Some(&base), &term_added, &new_rendered, "My search"));

        let op_changed = model.set_operator("bucket-1", crate::model::Operator::Or);
        assert!(is_dirty(Some(&base), &op_changed, &rendered, "My search"));

        let mode_changed = model.set_output_mode(OutputMode::Minified);
        assert!(is_dirty(Some(&base), &mode_changed, &rendered, "My search"));

        assert!(is_dirty(Some(&base), &model, &rendered, "Renamed"));
    }
}
