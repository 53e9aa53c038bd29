use anyhow::{Context, Result};
use std::path::PathBuf;

const DEFAULT_LOG_FILTER: &str = "golf_league=info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON league file the in-memory repository is loaded from.
    pub snapshot_path: PathBuf,
    /// Save the league back to `snapshot_path` after a mutating command.
    pub write_back: bool,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let snapshot_path = lookup("LEAGUE_SNAPSHOT")
            .context("Cannot load LEAGUE_SNAPSHOT env variable")?
            .into();
        let write_back = match lookup("LEAGUE_WRITE_BACK") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("LEAGUE_WRITE_BACK must be true or false")?,
            None => true,
        };

        Ok(Self {
            snapshot_path,
            write_back,
            log_filter: lookup("LEAGUE_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}
