//! Integration tests for the full save/load/export workflow

use boolean_builder::store::transfer;
use boolean_builder::{OutputMode, SavedSearchStore, Session};
use tempfile::TempDir;

fn seeded_marker(dir: &TempDir) {
    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(boolean_builder::paths::seed_marker_path(dir.path()), "").unwrap();
}

#[test]
fn test_compose_save_reload_cycle() {
    let dir = TempDir::new().unwrap();
    seeded_marker(&dir);

    let mut session = Session::load(dir.path());
    session.apply(
        session
            .model
            .rename_bucket("bucket-1", "Titles")
            .add_term("bucket-1", "engineer")
            .add_bucket()
            .add_terms_bulk("bucket-2", "React, TypeScript")
            .set_output_mode(OutputMode::Minified),
    );
    assert_eq!(session.rendered, "(engineer) AND (React OR TypeScript)");

    session.name = "Frontend".to_string();
    let mut store = SavedSearchStore::open(dir.path()).unwrap();
    let saved = store
        .create("Frontend", None, session.model.clone(), &session.rendered)
        .unwrap();
    store.mark_used(&saved.id).unwrap();
    session.record_save(&saved.id, &saved.name);
    session.persist().unwrap();

    // A fresh process sees the same state and a clean dirty flag.
    let reloaded = Session::load(dir.path());
    assert_eq!(reloaded.model, session.model);
    assert_eq!(reloaded.rendered, "(engineer) AND (React OR TypeScript)");
    assert_eq!(reloaded.name, "Frontend");
    assert_eq!(reloaded.active_saved_id.as_deref(), Some(saved.id.as_str()));
    assert!(!reloaded.is_dirty());

    // Any change dirties it again.
    let mut changed = reloaded;
    changed.apply(changed.model.add_term("bucket-2", "JavaScript"));
    assert!(changed.is_dirty());
}

#[test]
fn test_loading_a_saved_search_shows_its_snapshot_verbatim() {
    let dir = TempDir::new().unwrap();
    seeded_marker(&dir);

    let mut store = SavedSearchStore::open(dir.path()).unwrap();
    let model = boolean_builder::QueryModel::default().add_term("bucket-1", "nurse");
    // The stored string is a snapshot; it need not match a re-render.
    let saved = store
        .create("Nurses", None, model, "(nurse) AND (stale snapshot)")
        .unwrap();

    let mut session = Session::load(dir.path());
    session.record_load(&saved);
    store.mark_used(&saved.id).unwrap();
    session.persist().unwrap();

    let reloaded = Session::load(dir.path());
    assert_eq!(reloaded.rendered, "(nurse) AND (stale snapshot)");
    assert!(!reloaded.is_dirty());
}

#[test]
fn test_import_replaces_never_merges() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    seeded_marker(&dir_a);
    seeded_marker(&dir_b);

    let mut source = SavedSearchStore::open(dir_a.path()).unwrap();
    let model = boolean_builder::QueryModel::default().add_term("bucket-1", "golang");
    source.create("Go devs", None, model.clone(), "(golang)").unwrap();
    source.create("More Go devs", None, model, "(golang)").unwrap();
    let document = source.export_all().unwrap();

    let mut target = SavedSearchStore::open(dir_b.path()).unwrap();
    let other = boolean_builder::QueryModel::default().add_term("bucket-1", "java");
    target.create("Java devs", None, other.clone(), "(java)").unwrap();
    target.create("Kotlin devs", None, other.clone(), "(kotlin)").unwrap();
    target.create("Scala devs", None, other, "(scala)").unwrap();

    let items = transfer::parse_import(&document).unwrap();
    assert_eq!(items.len(), 2);
    target.replace_all(items).unwrap();

    assert_eq!(target.items().len(), 2);
    assert!(target.items().iter().all(|item| item.name.contains("Go")));

    // The replacement survives a reopen.
    let reopened = SavedSearchStore::open(dir_b.path()).unwrap();
    assert_eq!(reopened.items().len(), 2);
}

#[test]
fn test_rejected_import_leaves_the_store_untouched() {
    let dir = TempDir::new().unwrap();
    seeded_marker(&dir);

    let mut store = SavedSearchStore::open(dir.path()).unwrap();
    let model = boolean_builder::QueryModel::default().add_term("bucket-1", "x");
    store.create("Keeper", None, model, "(x)").unwrap();

    let bad = r#"{"type": "some-other-export", "version": 1, "items": []}"#;
    assert!(transfer::parse_import(bad).is_err());

    let reopened = SavedSearchStore::open(dir.path()).unwrap();
    assert_eq!(reopened.items().len(), 1);
    assert_eq!(reopened.items()[0].name, "Keeper");
}
