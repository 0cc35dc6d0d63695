//! File-change triggers for job definitions

use crate::error::{Error, Result};
use regex::Regex;

/// Compiled `run_if_changed` pattern
///
/// The policy query only needs to know that a job is conditional; the
/// path check is exposed for trigger logic that has the changed files.
#[derive(Debug, Clone)]
pub struct ChangeMatcher {
    run_if_changed: Regex,
}

impl ChangeMatcher {
    /// Compile a `run_if_changed` pattern. Blank patterns yield `None`.
    pub fn compile(pattern: Option<&str>) -> Result<Option<Self>> {
        let Some(pattern) = pattern.filter(|p| !p.trim().is_empty()) else {
            return Ok(None);
        };
        let run_if_changed = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            field: "run_if_changed".to_string(),
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Some(Self { run_if_changed }))
    }

    /// The source pattern
    pub fn pattern(&self) -> &str {
        self.run_if_changed.as_str()
    }

    /// Whether any of the changed paths matches the pattern
    pub fn matches_changes<I, S>(&self, changed_paths: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        changed_paths
            .into_iter()
            .any(|path| self.run_if_changed.is_match(path.as_ref()))
    }
}
