//! CI job definitions
//!
//! Jobs are configured per repository (keyed by `"org/repo"`) and compiled
//! once at load time. Nothing in here compiles patterns lazily.

mod brancher;
mod change_matcher;
mod presubmit;

pub use brancher::{Brancher, BrancherConfig};
pub use change_matcher::ChangeMatcher;
pub use presubmit::{Presubmit, PresubmitConfig};

use crate::error::{Error, Result};
use crate::types::JobClass;
use std::collections::HashMap;

/// Compiled presubmits for every configured repository
#[derive(Debug, Clone, Default)]
pub struct JobConfig {
    presubmits: HashMap<String, Vec<Presubmit>>,
}

impl JobConfig {
    /// Compile raw presubmits keyed by repository full name.
    pub fn compile<S: std::hash::BuildHasher>(
        raw: &HashMap<String, Vec<PresubmitConfig>, S>,
    ) -> Result<Self> {
        let mut presubmits = HashMap::with_capacity(raw.len());
        for (full_name, jobs) in raw {
            if full_name.split_once('/').is_none_or(|(o, r)| o.is_empty() || r.is_empty()) {
                return Err(Error::Config(format!(
                    "presubmits key `{full_name}` is not of the form org/repo"
                )));
            }
            let compiled = jobs
                .iter()
                .map(PresubmitConfig::compile)
                .collect::<Result<Vec<_>>>()
                .and_then(|compiled| check_shared_contexts(&compiled).map(|()| compiled))
                .map_err(|e| e.within(full_name))?;
            presubmits.insert(full_name.clone(), compiled);
        }
        Ok(Self { presubmits })
    }

    /// Presubmits configured for `org/repo` (empty if none)
    pub fn presubmits(&self, org: &str, repo: &str) -> &[Presubmit] {
        self.presubmits
            .get(&format!("{org}/{repo}"))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of repositories with presubmits
    pub fn repo_count(&self) -> usize {
        self.presubmits.len()
    }

    /// Total number of presubmits across all repositories
    pub fn job_count(&self) -> usize {
        self.presubmits.values().map(Vec::len).sum()
    }
}

/// Jobs may share a context only if they report it in the same class.
fn check_shared_contexts(jobs: &[Presubmit]) -> Result<()> {
    let mut seen: HashMap<&str, (&str, JobClass)> = HashMap::new();
    for job in jobs {
        let Some(class) = job.reporting_class() else {
            continue;
        };
        match seen.get(job.context.as_str()) {
            Some(&(other, other_class)) if other_class != class => {
                return Err(Error::Config(format!(
                    "context `{}` is reported as {other_class} by `{other}` and as {class} by `{}`",
                    job.context, job.name
                )));
            }
            Some(_) => {}
            None => {
                seen.insert(job.context.as_str(), (job.name.as_str(), class));
            }
        }
    }
    Ok(())
}
