//! Branch filters for job definitions

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Raw include/exclude branch patterns as written in configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrancherConfig {
    /// Branch patterns the job runs against (empty = all branches)
    pub branches: Vec<String>,
    /// Branch patterns the job never runs against
    pub skip_branches: Vec<String>,
}

impl BrancherConfig {
    /// Compile the patterns into a [`Brancher`].
    pub fn compile(&self) -> Result<Brancher> {
        Ok(Brancher {
            branches: compile_alternatives("branches", &self.branches)?,
            skip_branches: compile_alternatives("skip_branches", &self.skip_branches)?,
        })
    }
}

/// Compiled branch filter
///
/// A branch is excluded if it matches any skip pattern; otherwise it is
/// included when no include patterns are set or one of them matches.
/// Patterns match the whole branch name.
#[derive(Debug, Clone, Default)]
pub struct Brancher {
    branches: Option<Regex>,
    skip_branches: Option<Regex>,
}

impl Brancher {
    /// Whether a job with this filter applies to `branch`
    pub fn should_run(&self, branch: &str) -> bool {
        if self
            .skip_branches
            .as_ref()
            .is_some_and(|re| re.is_match(branch))
        {
            return false;
        }
        self.branches.as_ref().is_none_or(|re| re.is_match(branch))
    }

    /// Whether the filter places no restriction at all
    pub const fn runs_against_all_branches(&self) -> bool {
        self.branches.is_none() && self.skip_branches.is_none()
    }
}

/// Join patterns into one anchored alternation, `None` when empty
fn compile_alternatives(field: &str, patterns: &[String]) -> Result<Option<Regex>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let pattern = format!("^(?:{})$", patterns.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|source| Error::InvalidPattern {
            field: field.to_string(),
            pattern,
            source,
        })
}
