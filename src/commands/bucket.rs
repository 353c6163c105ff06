//! Bucket commands: add, delete, rename, toggle, operator, reorder, list.

use anyhow::{bail, Result};
use boolean_builder::model::MAX_BUCKETS;
use boolean_builder::{Config, Operator, QueryModel, Session};
use colored::Colorize;

use crate::commands::confirm;

#[derive(Debug, Clone, clap::Subcommand)]
pub enum BucketCommands {
    /// Append a new empty bucket (max 8)
    Add,

    /// Delete a bucket; deleting the last one leaves a fresh empty default
    Rm {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Rename a bucket (display only, never affects the query)
    Rename { id: String, name: String },

    /// Enable or disable a bucket; its terms are kept
    Toggle { id: String },

    /// Set the operator joining this bucket to the next (and | or | and-not)
    Op { id: String, operator: String },

    /// Reorder buckets by listing their ids in the new order
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List buckets with their ids, terms, and state
    List {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

pub fn execute(command: BucketCommands) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(&config.home);

    match command {
        BucketCommands::Add => {
            if session.model.buckets.len() >= MAX_BUCKETS {
                bail!("Bucket cap reached ({MAX_BUCKETS})");
            }
            session.apply(session.model.add_bucket());
            session.persist()?;
            if let Some(new) = session.model.buckets.last() {
                println!("{} {} ({})", "Added".green(), new.name, new.id);
            }
        }
        BucketCommands::Rm { id, yes } => {
            let bucket = match session.model.bucket(&id) {
                Some(b) => b,
                None => bail!("No bucket with id: {id}"),
            };
            let prompt = format!(
                "Delete bucket '{}' and its {} term(s)?",
                bucket.name,
                bucket.terms.len()
            );
            if !bucket.terms.is_empty() && !confirm(&prompt, yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            session.apply(session.model.delete_bucket(&id));
            session.persist()?;
            println!("{} bucket {id}", "Deleted".green());
        }
        BucketCommands::Rename { id, name } => {
            if session.model.bucket(&id).is_none() {
                bail!("No bucket with id: {id}");
            }
            session.apply(session.model.rename_bucket(&id, &name));
            session.persist()?;
            println!("{} {id} to '{name}'", "Renamed".green());
        }
        BucketCommands::Toggle { id } => {
            let enabled_before = match session.model.bucket(&id) {
                Some(b) => b.is_enabled,
                None => bail!("No bucket with id: {id}"),
            };
            session.apply(session.model.toggle_bucket(&id));
            session.persist()?;
            let state = if enabled_before { "disabled" } else { "enabled" };
            println!("{id} is now {state}");
            println!("{}", session.rendered);
        }
        BucketCommands::Op { id, operator } => {
            if session.model.bucket(&id).is_none() {
                bail!("No bucket with id: {id}");
            }
            let operator: Operator = operator.parse().map_err(anyhow::Error::msg)?;
            session.apply(session.model.set_operator(&id, operator));
            session.persist()?;
            println!("{} now joins with {}", id, operator.to_string().cyan());
            println!("{}", session.rendered);
        }
        BucketCommands::Reorder { ids } => {
            validate_reorder(&session.model, &ids)?;
            session.apply(session.model.reorder_buckets(&ids));
            session.persist()?;
            println!("{} buckets", "Reordered".green());
            print_buckets(&session);
        }
        BucketCommands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&session.model)?);
            } else {
                print_buckets(&session);
            }
        }
    }

    Ok(())
}

/// The engine drops any bucket missing from the list, which would
/// silently delete its terms. Require the full id set on the CLI.
fn validate_reorder(model: &QueryModel, ids: &[String]) -> Result<()> {
    if let Some(unknown) = ids.iter().find(|id| model.bucket(id).is_none()) {
        bail!("No bucket with id: {unknown}");
    }
    let missing: Vec<&str> = model
        .buckets
        .iter()
        .map(|b| b.id.as_str())
        .filter(|id| !ids.iter().any(|given| given == id))
        .collect();
    if !missing.is_empty() {
        bail!("Reorder must list every bucket; missing: {}", missing.join(", "));
    }
    Ok(())
}

fn print_buckets(session: &Session) {
    for (i, bucket) in session.model.buckets.iter().enumerate() {
        let state = if bucket.is_enabled {
            "on".green()
        } else {
            "off".red()
        };
        let terms: Vec<&str> = bucket.terms.iter().map(|t| t.value.as_str()).collect();
        let joiner = if i + 1 < session.model.buckets.len() {
            format!("  -> {}", bucket.operator_after)
        } else {
            String::new()
        };
        println!(
            "{} [{}] {} ({}): {}{}",
            bucket.id.bold(),
            state,
            bucket.name,
            bucket.terms.len(),
            terms.join(", "),
            joiner.dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_bucket_model() -> QueryModel {
        QueryModel::default().add_bucket().add_term("bucket-2", "React")
    }

    #[test]
    fn reorder_accepts_the_full_id_set() {
        let model = two_bucket_model();
        let ids = vec!["bucket-2".to_string(), "bucket-1".to_string()];
        assert!(validate_reorder(&model, &ids).is_ok());
    }

    #[test]
    fn reorder_rejects_a_partial_id_set() {
        let model = two_bucket_model();
        let ids = vec!["bucket-1".to_string()];
        let err = validate_reorder(&model, &ids).unwrap_err();
        assert!(err.to_string().contains("bucket-2"));
        // The terms the partial list would have dropped are still there.
        assert_eq!(model.bucket("bucket-2").map(|b| b.terms.len()), Some(1));
    }

    #[test]
    fn reorder_rejects_an_unknown_id() {
        let model = two_bucket_model();
        let ids = vec!["bucket-1".to_string(), "bucket-9".to_string()];
        assert!(validate_reorder(&model, &ids).is_err());
    }
}
