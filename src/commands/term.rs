//! Term commands: add, remove, move.

use anyhow::{bail, Result};
use boolean_builder::{Config, QueryModel, Session};
use colored::Colorize;

#[derive(Debug, Clone, clap::Subcommand)]
pub enum TermCommands {
    /// Add terms to a bucket; commas and newlines split into multiple terms
    Add {
        /// Bucket id (see `boolb bucket list`)
        bucket_id: String,

        /// Term text, e.g. "product manager" or "React, TypeScript"
        text: String,
    },

    /// Remove the term at a zero-based position
    Rm {
        bucket_id: String,
        index: usize,
    },

    /// Move a term, within or across buckets
    Mv {
        source_bucket: String,
        source_index: usize,
        target_bucket: String,
        target_index: usize,
    },
}

pub fn execute(command: TermCommands) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load(&config.home);

    match command {
        TermCommands::Add { bucket_id, text } => {
            if session.model.bucket(&bucket_id).is_none() {
                bail!("No bucket with id: {bucket_id}");
            }
            let before = term_count(&session.model, &bucket_id);
            session.apply(session.model.add_terms_bulk(&bucket_id, &text));
            let added = term_count(&session.model, &bucket_id) - before;
            session.persist()?;

            if added == 0 {
                println!("{}", "Nothing added (empty or duplicate terms)".yellow());
            } else {
                println!("{} {added} term(s) to {bucket_id}", "Added".green());
                println!("{}", session.rendered);
            }
        }
        TermCommands::Rm { bucket_id, index } => {
            if session.model.bucket(&bucket_id).is_none() {
                bail!("No bucket with id: {bucket_id}");
            }
            let before = term_count(&session.model, &bucket_id);
            session.apply(session.model.remove_term(&bucket_id, index));
            if term_count(&session.model, &bucket_id) == before {
                bail!("No term at index {index} in {bucket_id}");
            }
            session.persist()?;
            println!("{} term {index} from {bucket_id}", "Removed".green());
        }
        TermCommands::Mv {
            source_bucket,
            source_index,
            target_bucket,
            target_index,
        } => {
            let next = session.model.move_term(
                &source_bucket,
                source_index,
                &target_bucket,
                target_index,
            );
            if next == session.model {
                bail!("Nothing moved - check the bucket ids and the source index");
            }
            session.apply(next);
            session.persist()?;
            println!("{} term to {target_bucket}", "Moved".green());
            println!("{}", session.rendered);
        }
    }

    Ok(())
}

fn term_count(model: &QueryModel, bucket_id: &str) -> usize {
    model
        .bucket(bucket_id)
        .map(|b| b.terms.len())
        .unwrap_or_default()
}
