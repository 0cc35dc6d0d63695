//! Reading keeper configuration files.

use super::{Config, RawConfig};
use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Parse TOML configuration text without compiling it.
pub fn parse_config(content: &str) -> Result<RawConfig> {
    Ok(toml::from_str(content)?)
}

/// Read `path` to a string, naming the path in the I/O error.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::Io(io::Error::new(
            e.kind(),
            format!("failed to read {}: {e}", path.display()),
        ))
    })
}

/// Load, parse and compile the configuration file at `path`.
///
/// Errors mention the path they came from.
pub fn load_config(path: &Path, generation: u64) -> Result<Config> {
    let content = read_file(path)?;

    let raw = parse_config(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    let config = raw
        .compile(generation)
        .map_err(|e| e.within(path.display()))?;

    debug!(
        path = %path.display(),
        generation,
        repos = config.jobs.repo_count(),
        jobs = config.jobs.job_count(),
        "loaded keeper config"
    );
    Ok(config)
}
