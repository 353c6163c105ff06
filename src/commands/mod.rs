pub mod bucket;
pub mod current;
pub mod saved;
pub mod show;
pub mod term;

use anyhow::{bail, Result};
use std::io::{self, Write};

/// Confirm prompt (y/N) before destructive actions. `--yes` skips it;
/// non-interactive runs without `--yes` are refused rather than guessed.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !atty::is(atty::Stream::Stdin) {
        bail!("Refusing without confirmation in a non-interactive run. Pass --yes.");
    }

    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let trimmed = input.trim();
    Ok(trimmed.eq_ignore_ascii_case("y") || trimmed.eq_ignore_ascii_case("yes"))
}
