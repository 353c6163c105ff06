//! Export/import file format for saved-search collections.
//!
//! The document shape matches the original builder's export exactly, so
//! files move between the two freely:
//!
//! ```json
//! {
//!   "type": "boolean-builder-saved-searches",
//!   "version": 1,
//!   "exportedAt": "2025-03-01T00:00:00.000Z",
//!   "items": [ ... ]
//! }
//! ```
//!
//! Import is validate-then-replace: a rejected file leaves the existing
//! collection untouched, an accepted one replaces it wholesale.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::store::saved::{now_iso, SavedSearch};

pub const EXPORT_TYPE: &str = "boolean-builder-saved-searches";
pub const EXPORT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ExportDocument<'a> {
    #[serde(rename = "type")]
    doc_type: &'a str,
    version: u32,
    #[serde(rename = "exportedAt")]
    exported_at: String,
    items: &'a [SavedSearch],
}

/// Serialize the full collection for export, pretty-printed.
pub fn export_document(items: &[SavedSearch]) -> Result<String> {
    let doc = ExportDocument {
        doc_type: EXPORT_TYPE,
        version: EXPORT_VERSION,
        exported_at: now_iso(),
        items,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Validate an import document and return its items. Validation failures
/// are hard errors surfaced to the user; nothing is applied on failure.
pub fn parse_import(raw: &str) -> Result<Vec<SavedSearch>> {
    let parsed: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => bail!("Import file is not valid JSON: {e}"),
    };

    match parsed.get("type").and_then(|t| t.as_str()) {
        Some(EXPORT_TYPE) => {}
        _ => bail!("Not a boolean-builder saved-searches export (wrong or missing \"type\")"),
    }

    if !parsed.get("version").map(|v| v.is_number()).unwrap_or(false) {
        bail!("Export \"version\" is missing or not numeric");
    }

    let items_value = match parsed.get("items") {
        Some(items) if items.is_array() => items.clone(),
        _ => bail!("Export \"items\" is missing or not an array"),
    };

    match serde_json::from_value(items_value) {
        Ok(items) => Ok(items),
        Err(e) => bail!("Export contains a malformed saved search: {e}"),
    }
}
