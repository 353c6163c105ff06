//! Render the current query and switch output modes.

use anyhow::Result;
use boolean_builder::{build_boolean, Config, OutputMode, Session};

pub fn execute(minified: bool, pretty: bool) -> Result<()> {
    let config = Config::load()?;
    let session = Session::load(&config.home);

    // One-off overrides render fresh without touching the stored mode.
    if minified || pretty {
        let mode = if minified {
            OutputMode::Minified
        } else {
            OutputMode::Pretty
        };
        println!("{}", build_boolean(&session.model.buckets, mode));
    } else {
        println!("{}", session.rendered);
    }

    Ok(())
}

pub fn set_mode(mode: &str) -> Result<()> {
    let mode: OutputMode = mode.parse().map_err(anyhow::Error::msg)?;

    let config = Config::load()?;
    let mut session = Session::load(&config.home);
    session.apply(session.model.set_output_mode(mode));
    session.persist()?;
    println!("{}", session.rendered);

    Ok(())
}
