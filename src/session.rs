//! The session controller: the one owner of the live query model.
//!
//! Holds the model, the rendered query string, the display name, the active
//! saved-search id, and the dirty baseline, and round-trips all of it
//! through two durable records (`state.json` for the model, `session.json`
//! for the rest). All model changes flow through [`Session::apply`], which
//! re-renders the preview; loading a saved search instead shows its stored
//! query string verbatim.
//!
//! Malformed or missing records are never an error: the session falls back
//! to a single default bucket and fresh metadata.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::build_boolean;
use crate::dirty;
use crate::model::QueryModel;
use crate::paths;
use crate::store::SavedSearch;

/// The part of the session that lives outside the query model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionMeta {
    #[serde(default)]
    current_name: String,
    #[serde(default)]
    active_saved_id: Option<String>,
    #[serde(default)]
    rendered_query: String,
    #[serde(default)]
    baseline: Option<String>,
}

/// Live working state, persisted across invocations.
#[derive(Debug)]
pub struct Session {
    home: PathBuf,
    pub model: QueryModel,
    pub rendered: String,
    pub name: String,
    pub active_saved_id: Option<String>,
    baseline: Option<String>,
}

impl Session {
    /// Load the session from the data directory, substituting defaults for
    /// anything missing or malformed.
    pub fn load(home: &Path) -> Session {
        let model = match fs::read_to_string(paths::state_path(home)) {
            Ok(raw) => QueryModel::from_persisted(&raw),
            Err(_) => QueryModel::default(),
        };

        let meta: SessionMeta = fs::read_to_string(paths::session_path(home))
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        // A fresh session has no stored rendering yet; derive one.
        let rendered = if meta.rendered_query.is_empty() && meta.baseline.is_none() {
            build_boolean(&model.buckets, model.output_mode)
        } else {
            meta.rendered_query
        };

        Session {
            home: home.to_path_buf(),
            model,
            rendered,
            name: meta.current_name,
            active_saved_id: meta.active_saved_id,
            baseline: meta.baseline,
        }
    }

    /// Write both records, whole and synchronously.
    pub fn persist(&self) -> Result<()> {
        fs::create_dir_all(&self.home)
            .with_context(|| format!("Failed to create data directory: {:?}", self.home))?;

        let state = serde_json::to_string_pretty(&self.model)?;
        fs::write(paths::state_path(&self.home), state)
            .with_context(|| "Failed to write state.json")?;

        let meta = SessionMeta {
            current_name: self.name.clone(),
            active_saved_id: self.active_saved_id.clone(),
            rendered_query: self.rendered.clone(),
            baseline: self.baseline.clone(),
        };
        let meta = serde_json::to_string_pretty(&meta)?;
        fs::write(paths::session_path(&self.home), meta)
            .with_context(|| "Failed to write session.json")?;

        Ok(())
    }

    /// Accept a mutated model and re-render the preview.
    pub fn apply(&mut self, next: QueryModel) {
        self.rendered = build_boolean(&next.buckets, next.output_mode);
        self.model = next;
    }

    pub fn is_dirty(&self) -> bool {
        dirty::is_dirty(
            self.baseline.as_deref(),
            &self.model,
            &self.rendered,
            &self.name,
        )
    }

    pub fn has_content(&self) -> bool {
        dirty::has_content(&self.model, &self.rendered)
    }

    /// Capture the baseline after a successful save.
    pub fn record_save(&mut self, saved_id: &str, name: &str) {
        self.active_saved_id = Some(saved_id.to_string());
        self.name = name.to_string();
        self.baseline = Some(dirty::snapshot(&self.model, &self.rendered, &self.name));
    }

    /// The active entry was renamed in the store. Take the new name and
    /// rebase the baseline on the stored snapshot, so an unsaved edit to
    /// the live model stays dirty.
    pub fn record_rename(&mut self, saved: &SavedSearch) {
        self.name = saved.name.clone();
        self.baseline = Some(dirty::snapshot(&saved.state, &saved.query_string, &self.name));
    }

    /// Overwrite the live state from a saved search. The stored query
    /// string is shown verbatim rather than re-rendered.
    pub fn record_load(&mut self, saved: &SavedSearch) {
        self.model = saved.state.clone();
        self.rendered = saved.query_string.clone();
        self.name = saved.name.clone();
        self.active_saved_id = Some(saved.id.clone());
        self.baseline = Some(dirty::snapshot(&self.model, &self.rendered, &self.name));
    }

    /// The active saved entry was deleted out from under us: keep the live
    /// model but drop the association and the baseline.
    pub fn detach_saved(&mut self, deleted_id: &str) {
        if self.active_saved_id.as_deref() == Some(deleted_id) {
            self.active_saved_id = None;
            self.name.clear();
            self.baseline = None;
        }
    }

    /// Reset the builder to defaults: one empty bucket, pretty mode, no
    /// name, no active save, no baseline.
    pub fn clear(&mut self) {
        self.model = QueryModel::default();
        self.rendered = String::new();
        self.name.clear();
        self.active_saved_id = None;
        self.baseline = None;
    }
}
