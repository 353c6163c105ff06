use anyhow::Result;
use std::path::PathBuf;

/// Configuration for the boolean builder
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory holding all durable records
    pub home: PathBuf,
}

impl Config {
    /// Load configuration, creating the data directory if needed
    pub fn load() -> Result<Self> {
        let home = crate::paths::default_home();
        std::fs::create_dir_all(&home)?;
        Ok(Self { home })
    }
}
