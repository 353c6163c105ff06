//! Commands acting on the current working search: name, save, status, clear.

use anyhow::{bail, Result};
use boolean_builder::store::SavedSearchUpdate;
use boolean_builder::{Config, SavedSearchStore, Session};
use colored::Colorize;
use serde_json::json;

use crate::commands::confirm;

pub fn set_name(name: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(&config.home);
    session.name = name.to_string();
    session.persist()?;
    println!("Current search named '{name}'");
    Ok(())
}

/// Save the working search. Creates a new saved entry when none is active,
/// otherwise updates the active one in place. Refused when the builder is
/// empty or no name is set.
pub fn save() -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(&config.home);

    if !session.has_content() {
        bail!("Nothing to save - the builder is empty");
    }
    let name = session.name.trim().to_string();
    if name.is_empty() {
        bail!("The current search has no name. Set one with: boolb name \"<name>\"");
    }

    let mut store = SavedSearchStore::open(&config.home)?;

    match session.active_saved_id.clone() {
        None => {
            let saved = store.create(&name, None, session.model.clone(), &session.rendered)?;
            store.mark_used(&saved.id)?;
            session.record_save(&saved.id, &saved.name);
            println!("{} '{}' ({})", "Saved".green(), saved.name, saved.id);
        }
        Some(id) => {
            store.update(
                &id,
                SavedSearchUpdate {
                    name: Some(name.clone()),
                    state: Some(session.model.clone()),
                    query_string: Some(session.rendered.clone()),
                    ..Default::default()
                },
            )?;
            store.mark_used(&id)?;
            session.record_save(&id, &name);
            println!("{} '{}' ({})", "Updated".green(), name, id);
        }
    }

    session.persist()?;
    Ok(())
}

pub fn status(json_output: bool) -> Result<()> {
    let config = Config::load()?;
    let session = Session::load(&config.home);

    let term_count: usize = session.model.buckets.iter().map(|b| b.terms.len()).sum();

    if json_output {
        let payload = json!({
            "name": session.name,
            "activeSavedId": session.active_saved_id,
            "isDirty": session.is_dirty(),
            "outputMode": session.model.output_mode,
            "bucketCount": session.model.buckets.len(),
            "termCount": term_count,
            "queryString": session.rendered,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let name = if session.name.is_empty() {
        "(unnamed)".dimmed().to_string()
    } else {
        session.name.clone()
    };
    println!("Name:     {name}");
    match &session.active_saved_id {
        Some(id) => println!("Saved as: {id}"),
        None => println!("Saved as: {}", "(not saved)".dimmed()),
    }
    let dirty = if session.is_dirty() {
        "yes".yellow()
    } else {
        "no".green()
    };
    println!("Dirty:    {dirty}");
    println!(
        "Buckets:  {} ({} terms)",
        session.model.buckets.len(),
        term_count
    );

    Ok(())
}

/// Reset the builder back to a single empty default bucket.
pub fn clear(yes: bool) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(&config.home);

    if session.has_content() && !confirm("Discard the current builder contents?", yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    session.clear();
    session.persist()?;
    println!("{}", "Builder reset".green());
    Ok(())
}
