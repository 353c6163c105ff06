//! Saved-search commands: list, load, rename, delete, recents, export, import.

use anyhow::{bail, Context, Result};
use boolean_builder::store::{transfer, SavedSearch, SavedSearchUpdate};
use boolean_builder::{Config, SavedSearchStore, Session};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::commands::confirm;

#[derive(Debug, Clone, clap::Subcommand)]
pub enum SavedCommands {
    /// List saved searches, most recently used first
    List {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Load a saved search into the builder
    Load { id: String },

    /// Rename a saved search
    Rename { id: String, name: String },

    /// Delete a saved search
    Rm {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show the most recently used saved searches
    Recents {
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Export the whole collection as a JSON document
    Export {
        /// Output file; stdout when omitted
        path: Option<PathBuf>,
    },

    /// Replace the whole collection from an export file (never merges)
    Import {
        path: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn execute(command: SavedCommands) -> Result<()> {
    let config = Config::load()?;
    let mut store = SavedSearchStore::open(&config.home)?;

    match command {
        SavedCommands::List { json } => {
            if json {
                let items: Vec<&SavedSearch> = store.list();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if store.items().is_empty() {
                println!("No saved searches yet. Save one with: boolb save");
            } else {
                print_items(&store.list());
            }
        }
        SavedCommands::Load { id } => {
            let saved = match store.get(&id) {
                Some(saved) => saved.clone(),
                None => bail!("No saved search with id: {id}"),
            };
            let mut session = Session::load(&config.home);
            session.record_load(&saved);
            store.mark_used(&saved.id)?;
            session.persist()?;
            println!("{} '{}'", "Loaded".green(), saved.name);
            println!("{}", session.rendered);
        }
        SavedCommands::Rename { id, name } => {
            if store.get(&id).is_none() {
                bail!("No saved search with id: {id}");
            }
            store.update(
                &id,
                SavedSearchUpdate {
                    name: Some(name.clone()),
                    ..Default::default()
                },
            )?;
            // Keep the live session in step when the active entry is renamed,
            // without clearing the dirty flag on unsaved edits.
            let mut session = Session::load(&config.home);
            if session.active_saved_id.as_deref() == Some(id.as_str()) {
                if let Some(updated) = store.get(&id) {
                    session.record_rename(updated);
                    session.persist()?;
                }
            }
            println!("{} to '{}'", "Renamed".green(), name);
        }
        SavedCommands::Rm { id, yes } => {
            let saved = match store.get(&id) {
                Some(saved) => saved.clone(),
                None => bail!("No saved search with id: {id}"),
            };
            if !confirm(&format!("Delete saved search '{}'?", saved.name), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            store.delete(&id)?;
            let mut session = Session::load(&config.home);
            session.detach_saved(&id);
            session.persist()?;
            println!("{} '{}'", "Deleted".green(), saved.name);
        }
        SavedCommands::Recents { limit } => {
            print_items(&store.get_recents(limit));
        }
        SavedCommands::Export { path } => {
            let document = store.export_all()?;
            match path {
                Some(path) => {
                    fs::write(&path, document)
                        .with_context(|| format!("Failed to write export: {:?}", path))?;
                    println!(
                        "{} {} saved search(es) to {}",
                        "Exported".green(),
                        store.items().len(),
                        path.display()
                    );
                }
                None => println!("{document}"),
            }
        }
        SavedCommands::Import { path, yes } => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read import file: {:?}", path))?;
            let items = transfer::parse_import(&raw)?;

            let prompt = format!(
                "Replace {} existing saved search(es) with {} imported one(s)?",
                store.items().len(),
                items.len()
            );
            if !confirm(&prompt, yes)? {
                println!("Cancelled.");
                return Ok(());
            }

            store.replace_all(items)?;

            // The active entry may not exist in the imported set anymore.
            let mut session = Session::load(&config.home);
            if let Some(active) = session.active_saved_id.clone() {
                if store.get(&active).is_none() {
                    session.detach_saved(&active);
                    session.persist()?;
                }
            }

            println!(
                "{} collection replaced ({} item(s))",
                "Imported".green(),
                store.items().len()
            );
        }
    }

    Ok(())
}

fn print_items(items: &[&SavedSearch]) {
    if items.is_empty() {
        println!("No saved searches.");
        return;
    }
    for item in items {
        let example = if item.is_example == Some(true) {
            " [example]".dimmed().to_string()
        } else {
            String::new()
        };
        println!("{}  {}{}", item.id.bold(), item.name, example);
        if let Some(desc) = &item.short_description {
            println!("    {}", desc.dimmed());
        }
        println!("    last used: {}", item.last_used_at.dimmed());
    }
}
