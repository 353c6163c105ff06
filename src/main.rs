use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "boolb", author, version = env!("CARGO_PKG_VERSION"), about = "Build boolean search strings from named term buckets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the current boolean query
    Show {
        /// Render on a single line regardless of the saved mode
        #[arg(long, conflicts_with = "pretty")]
        minified: bool,

        /// Render one token per line regardless of the saved mode
        #[arg(long)]
        pretty: bool,
    },

    /// Set the persistent output mode (pretty | minified)
    Mode {
        /// pretty or minified
        mode: String,
    },

    /// Manage terms inside a bucket
    Term {
        #[command(subcommand)]
        command: commands::term::TermCommands,
    },

    /// Manage buckets
    Bucket {
        #[command(subcommand)]
        command: commands::bucket::BucketCommands,
    },

    /// Set the display name of the current search
    Name {
        /// Name used when saving
        name: String,
    },

    /// Save the current search (creates, or updates the active saved entry)
    Save,

    /// Show the working state: dirty flag, active saved entry, counts
    Status {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Reset the builder to a single empty bucket
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Manage saved searches
    Saved {
        #[command(subcommand)]
        command: commands::saved::SavedCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { minified, pretty } => {
            commands::show::execute(minified, pretty)?;
        }
        Commands::Mode { mode } => {
            commands::show::set_mode(&mode)?;
        }
        Commands::Term { command } => {
            commands::term::execute(command)?;
        }
        Commands::Bucket { command } => {
            commands::bucket::execute(command)?;
        }
        Commands::Name { name } => {
            commands::current::set_name(&name)?;
        }
        Commands::Save => {
            commands::current::save()?;
        }
        Commands::Status { json } => {
            commands::current::status(json)?;
        }
        Commands::Clear { yes } => {
            commands::current::clear(yes)?;
        }
        Commands::Saved { command } => {
            commands::saved::execute(command)?;
        }
    }

    Ok(())
}
