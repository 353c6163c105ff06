//! Single source of truth for the boolean-builder filesystem layout.
//!
//! This module defines WHERE data lives. It has no I/O, no validation,
//! no business logic.
//!
//! ```text
//! ~/.boolb/
//! ├── state.json            # Current query model {buckets, outputMode}
//! ├── session.json          # Name, active saved id, rendered string, baseline
//! ├── saved_searches.json   # Saved-search collection {version, items}
//! └── examples_seeded       # One-time seeding marker (empty file)
//! ```

use std::path::{Path, PathBuf};

/// Default data directory: `~/.boolb/`. `BOOLB_HOME` overrides it.
pub fn default_home() -> PathBuf {
    if let Ok(home) = std::env::var("BOOLB_HOME") {
        if !home.is_empty() {
            return PathBuf::from(home);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".boolb")
}

/// Current query model record: `state.json`
pub fn state_path(home: &Path) -> PathBuf {
    home.join("state.json")
}

/// Session metadata record: `session.json`
pub fn session_path(home: &Path) -> PathBuf {
    home.join("session.json")
}

/// Saved-search collection record: `saved_searches.json`
pub fn saved_searches_path(home: &Path) -> PathBuf {
    home.join("saved_searches.json")
}

/// One-time example seeding marker: `examples_seeded`
pub fn seed_marker_path(home: &Path) -> PathBuf {
    home.join("examples_seeded")
}
