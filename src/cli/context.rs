//! Shared command context for CLI commands

use merge_keeper::config::{Config, load_config};
use merge_keeper::error::Result;
use std::path::{Path, PathBuf};

/// Setup shared by every command: the loaded configuration snapshot
pub struct CommandContext {
    /// Path the configuration was read from
    pub config_path: PathBuf,
    /// Compiled configuration
    pub config: Config,
}

impl CommandContext {
    /// Load and compile the configuration at `config_path`
    pub fn new(config_path: &Path) -> Result<Self> {
        let config = load_config(config_path, 1)?;
        Ok(Self {
            config_path: config_path.to_path_buf(),
            config,
        })
    }
}

/// Target branch of a command
#[derive(Debug, Clone)]
pub struct Target {
    /// Organization
    pub org: String,
    /// Repository
    pub repo: String,
    /// Branch name (literal, not a pattern)
    pub branch: String,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.org, self.repo, self.branch)
    }
}
