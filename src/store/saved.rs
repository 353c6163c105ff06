//! The saved-search store: a named collection of query-model snapshots.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::model::QueryModel;
use crate::paths;
use crate::store::seed;
use crate::store::transfer::EXPORT_VERSION;

/// A named, timestamped snapshot of a query model plus its rendered string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_example: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub query_string: String,
    pub state: QueryModel,
    /// ISO-8601 timestamps, kept as strings: imported files may carry
    /// values we cannot parse, and those must survive a round trip.
    pub created_at: String,
    pub updated_at: String,
    pub last_used_at: String,
}

/// The unit of durable storage and of export/import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSearchCollection {
    pub version: u32,
    pub items: Vec<SavedSearch>,
}

impl Default for SavedSearchCollection {
    fn default() -> Self {
        SavedSearchCollection {
            version: EXPORT_VERSION,
            items: Vec::new(),
        }
    }
}

/// Partial update for [`SavedSearchStore::update`]. Only `state` and
/// `query_string` are query-affecting; a rename alone does not advance
/// `updatedAt`.
#[derive(Debug, Default)]
pub struct SavedSearchUpdate {
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub state: Option<QueryModel>,
    pub query_string: Option<String>,
}

/// Owns the collection and its durable record. Every mutating operation
/// persists the whole collection immediately.
#[derive(Debug)]
pub struct SavedSearchStore {
    path: PathBuf,
    collection: SavedSearchCollection,
}

impl SavedSearchStore {
    /// Open the store in the given data directory. A missing or corrupt
    /// record yields an empty collection (the corrupt file is cleared).
    /// On the very first open ever, the bundled example searches are
    /// merged in and a permanent marker prevents re-seeding.
    pub fn open(home: &Path) -> Result<SavedSearchStore> {
        fs::create_dir_all(home)
            .with_context(|| format!("Failed to create data directory: {:?}", home))?;

        let path = paths::saved_searches_path(home);
        let collection = load_collection(&path);

        let mut store = SavedSearchStore { path, collection };

        let marker = paths::seed_marker_path(home);
        if !marker.exists() {
            store.seed_examples()?;
            fs::write(&marker, "").with_context(|| "Failed to write seeding marker")?;
        }

        Ok(store)
    }

    fn seed_examples(&mut self) -> Result<()> {
        for example in seed::example_searches() {
            let key = example.name.trim().to_lowercase();
            let collides = self
                .collection
                .items
                .iter()
                .any(|item| item.name.trim().to_lowercase() == key);
            if !collides {
                self.collection.items.push(example);
            }
        }
        self.persist()
    }

    /// Create a new saved search. All three timestamps are stamped with now
    /// and a fresh unique id is assigned.
    pub fn create(
        &mut self,
        name: &str,
        short_description: Option<String>,
        state: QueryModel,
        query_string: &str,
    ) -> Result<SavedSearch> {
        let now = now_iso();
        let item = SavedSearch {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            is_example: None,
            short_description,
            query_string: query_string.to_string(),
            state,
            created_at: now.clone(),
            updated_at: now.clone(),
            last_used_at: now,
        };
        self.collection.items.push(item.clone());
        self.persist()?;
        Ok(item)
    }

    /// Apply a partial update. Unknown ids are a no-op. `updatedAt` only
    /// advances when the state or query string changed.
    pub fn update(&mut self, id: &str, updates: SavedSearchUpdate) -> Result<()> {
        let touched = updates.state.is_some() || updates.query_string.is_some();

        if let Some(item) = self.collection.items.iter_mut().find(|item| item.id == id) {
            if let Some(name) = updates.name {
                item.name = name;
            }
            if let Some(desc) = updates.short_description {
                item.short_description = Some(desc);
            }
            if let Some(state) = updates.state {
                item.state = state;
            }
            if let Some(query_string) = updates.query_string {
                item.query_string = query_string;
            }
            if touched {
                item.updated_at = now_iso();
            }
        }
        self.persist()
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.collection.items.retain(|item| item.id != id);
        self.persist()
    }

    /// Stamp `lastUsedAt` with now.
    pub fn mark_used(&mut self, id: &str) -> Result<()> {
        if let Some(item) = self.collection.items.iter_mut().find(|item| item.id == id) {
            item.last_used_at = now_iso();
        }
        self.persist()
    }

    /// Bulk import: discards the prior collection wholesale.
    pub fn replace_all(&mut self, items: Vec<SavedSearch>) -> Result<()> {
        self.collection = SavedSearchCollection {
            version: EXPORT_VERSION,
            items,
        };
        self.persist()
    }

    pub fn get(&self, id: &str) -> Option<&SavedSearch> {
        self.collection.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[SavedSearch] {
        &self.collection.items
    }

    /// All items, most recently used first. Timestamps that don't parse
    /// sort last.
    pub fn list(&self) -> Vec<&SavedSearch> {
        let mut items: Vec<&SavedSearch> = self.collection.items.iter().collect();
        items.sort_by_key(|item| std::cmp::Reverse(used_at_millis(item)));
        items
    }

    /// Top-N by `lastUsedAt`.
    pub fn get_recents(&self, limit: usize) -> Vec<&SavedSearch> {
        let mut items = self.list();
        items.truncate(limit);
        items
    }

    /// Serialize the whole collection as an export document.
    pub fn export_all(&self) -> Result<String> {
        crate::store::transfer::export_document(self.items())
    }

    fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.collection)?;
        fs::write(&self.path, payload)
            .with_context(|| format!("Failed to write saved searches: {:?}", self.path))
    }
}

fn load_collection(path: &Path) -> SavedSearchCollection {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return SavedSearchCollection::default(),
    };

    match parse_collection(&raw) {
        Some(collection) => collection,
        None => {
            // Corrupt record: clear it and start over.
            let _ = fs::remove_file(path);
            SavedSearchCollection::default()
        }
    }
}

fn parse_collection(raw: &str) -> Option<SavedSearchCollection> {
    let parsed: serde_json::Value = serde_json::from_str(raw).ok()?;
    let items_value = parsed.get("items")?;
    if !items_value.is_array() {
        return None;
    }
    let items: Vec<SavedSearch> = serde_json::from_value(items_value.clone()).ok()?;
    let version = parsed
        .get("version")
        .and_then(|v| v.as_u64())
        .map(|v| v as u32)
        .unwrap_or(EXPORT_VERSION);
    Some(SavedSearchCollection { version, items })
}

/// Now, as the same ISO-8601 string shape the original builder stored
/// (millisecond precision, `Z` suffix).
pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn used_at_millis(item: &SavedSearch) -> i64 {
    DateTime::parse_from_rfc3339(&item.last_used_at)
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_unseeded(dir: &TempDir) -> SavedSearchStore {
        // Pre-place the marker so tests control the collection contents.
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(paths::seed_marker_path(dir.path()), "").unwrap();
        SavedSearchStore::open(dir.path()).unwrap()
    }

    fn sample_model() -> QueryModel {
        QueryModel::default().add_term("bucket-1", "engineer")
    }

    #[test]
    fn first_open_seeds_examples_exactly_once() {
        let dir = TempDir::new().unwrap();
        let store = SavedSearchStore::open(dir.path()).unwrap();
        assert_eq!(store.items().len(), seed::example_searches().len());

        // Second open must not duplicate them.
        let again = SavedSearchStore::open(dir.path()).unwrap();
        assert_eq!(again.items().len(), store.items().len());
    }

    #[test]
    fn seeding_skips_name_collisions_case_insensitively() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path()).unwrap();
        let examples = seed::example_searches();
        let mut existing = examples[0].clone();
        existing.id = "pre-existing".to_string();
        existing.name = format!("  {}  ", examples[0].name.to_uppercase());
        let collection = SavedSearchCollection {
            version: EXPORT_VERSION,
            items: vec![existing],
        };
        std::fs::write(
            paths::saved_searches_path(dir.path()),
            serde_json::to_string(&collection).unwrap(),
        )
        .unwrap();

        let store = SavedSearchStore::open(dir.path()).unwrap();
        assert_eq!(store.items().len(), examples.len());
        assert!(store.get("pre-existing").is_some());
    }

    #[test]
    fn create_stamps_all_timestamps_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = open_unseeded(&dir);
        let saved = store
            .create("Mine", Some("desc".to_string()), sample_model(), "(engineer)")
            .unwrap();
        assert_eq!(saved.created_at, saved.updated_at);
        assert_eq!(saved.created_at, saved.last_used_at);

        let reopened = SavedSearchStore::open(dir.path()).unwrap();
        assert_eq!(reopened.items().len(), 1);
        assert_eq!(reopened.get(&saved.id).unwrap().name, "Mine");
    }

    #[test]
    fn rename_alone_does_not_advance_updated_at() {
        let dir = TempDir::new().unwrap();
        let mut store = open_unseeded(&dir);
        let saved = store
            .create("Old name", None, sample_model(), "(engineer)")
            .unwrap();

        store
            .update(
                &saved.id,
                SavedSearchUpdate {
                    name: Some("New name".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        let item = store.get(&saved.id).unwrap();
        assert_eq!(item.name, "New name");
        assert_eq!(item.updated_at, saved.updated_at);

        store
            .update(
                &saved.id,
                SavedSearchUpdate {
                    query_string: Some("(developer)".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        let item = store.get(&saved.id).unwrap();
        assert_eq!(item.query_string, "(developer)");
        assert!(item.updated_at >= saved.updated_at);
        assert_eq!(item.created_at, saved.created_at);
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_unseeded(&dir);
        store
            .update(
                "missing",
                SavedSearchUpdate {
                    name: Some("whatever".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(store.items().is_empty());
    }

    #[test]
    fn saved_snapshot_is_independent_of_the_live_model() {
        let dir = TempDir::new().unwrap();
        let mut store = open_unseeded(&dir);
        let model = sample_model();
        let saved = store.create("Snap", None, model.clone(), "(engineer)").unwrap();

        // Mutate the "live" model; the stored copy must not change.
        let _mutated = model.add_term("bucket-1", "developer");
        assert_eq!(store.get(&saved.id).unwrap().state, sample_model());
    }

    #[test]
    fn list_sorts_by_last_used_desc_with_unparsable_last() {
        let dir = TempDir::new().unwrap();
        let mut store = open_unseeded(&dir);
        let a = store.create("A", None, sample_model(), "(a)").unwrap();
        let b = store.create("B", None, sample_model(), "(b)").unwrap();
        let c = store.create("C", None, sample_model(), "(c)").unwrap();

        // Explicit timestamps: creation times can share a millisecond.
        for (id, used_at) in [
            (&a.id, "2025-03-01T00:00:00.000Z"),
            (&b.id, "2025-03-02T00:00:00.000Z"),
            (&c.id, "not a timestamp"),
        ] {
            let item = store
                .collection
                .items
                .iter_mut()
                .find(|item| &item.id == id)
                .unwrap();
            item.last_used_at = used_at.to_string();
        }

        let names: Vec<&str> = store.list().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);

        let recents = store.get_recents(1);
        assert_eq!(recents.len(), 1);
        assert_eq!(recents[0].name, "B");
    }

    #[test]
    fn replace_all_discards_prior_items() {
        let dir = TempDir::new().unwrap();
        let mut store = open_unseeded(&dir);
        store.create("Old 1", None, sample_model(), "(a)").unwrap();
        let keeper = store.create("Old 2", None, sample_model(), "(b)").unwrap();

        store.replace_all(vec![keeper.clone()]).unwrap();

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, keeper.id);
        assert!(store.list().iter().all(|item| item.name != "Old 1"));
    }

    #[test]
    fn corrupt_record_resets_to_empty_and_is_cleared() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(paths::seed_marker_path(dir.path()), "").unwrap();
        let path = paths::saved_searches_path(dir.path());
        std::fs::write(&path, "{ not json").unwrap();

        let store = SavedSearchStore::open(dir.path()).unwrap();
        assert!(store.items().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn collection_json_uses_original_field_names() {
        let dir = TempDir::new().unwrap();
        let mut store = open_unseeded(&dir);
        store.create("Names", None, sample_model(), "(engineer)").unwrap();
        let raw = std::fs::read_to_string(paths::saved_searches_path(dir.path())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let item = &value["items"][0];
        assert!(item.get("queryString").is_some());
        assert!(item.get("createdAt").is_some());
        assert!(item.get("lastUsedAt").is_some());
        assert!(item["state"].get("outputMode").is_some());
        assert!(item["state"]["buckets"][0].get("isEnabled").is_some());
        assert!(item["state"]["buckets"][0]["terms"][0].get("colorKey").is_some());
    }
}
