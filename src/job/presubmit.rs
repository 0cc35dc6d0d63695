//! Presubmit job definitions

use super::{Brancher, BrancherConfig, ChangeMatcher};
use crate::error::{Error, Result};
use crate::types::JobClass;
use serde::{Deserialize, Serialize};

/// A presubmit job as written in configuration (patterns not yet compiled)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresubmitConfig {
    /// Job name
    pub name: String,
    /// Status context reported by the job (defaults to `name`)
    pub context: Option<String>,
    /// Trigger for every pull request on applicable branches
    pub always_run: bool,
    /// Outcome never blocks merge
    pub optional: bool,
    /// Result is never reported as a status
    pub skip_report: bool,
    /// Trigger only when a changed path matches this pattern
    pub run_if_changed: Option<String>,
    /// Branch filter
    #[serde(flatten)]
    pub brancher: BrancherConfig,
}

impl PresubmitConfig {
    /// Compile branch and change patterns into a frozen [`Presubmit`].
    pub fn compile(&self) -> Result<Presubmit> {
        let context = self
            .context
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(self.name.as_str());
        if context.trim().is_empty() {
            return Err(Error::Config(
                "presubmit has neither a name nor a context".to_string(),
            ));
        }

        Ok(Presubmit {
            name: self.name.clone(),
            context: context.to_string(),
            always_run: self.always_run,
            optional: self.optional,
            skip_report: self.skip_report,
            brancher: self.brancher.compile()?,
            change_matcher: ChangeMatcher::compile(self.run_if_changed.as_deref())?,
        })
    }
}

/// A compiled presubmit job definition
#[derive(Debug, Clone)]
pub struct Presubmit {
    /// Job name
    pub name: String,
    /// Status context reported by the job
    pub context: String,
    /// Trigger for every pull request on applicable branches
    pub always_run: bool,
    /// Outcome never blocks merge
    pub optional: bool,
    /// Result is never reported as a status
    pub skip_report: bool,
    /// Branch filter
    pub brancher: Brancher,
    /// File-change trigger
    pub change_matcher: Option<ChangeMatcher>,
}

impl Presubmit {
    /// Whether the job applies to `branch`
    pub fn could_run(&self, branch: &str) -> bool {
        self.brancher.should_run(branch)
    }

    /// Whether the job runs only under some condition (changed paths or
    /// an explicit trigger) rather than on every pull request
    pub const fn triggers_conditionally(&self) -> bool {
        !self.always_run
    }

    /// Class of the job's context on any branch it applies to.
    ///
    /// `None` when the job never reports a status.
    pub const fn reporting_class(&self) -> Option<JobClass> {
        if self.skip_report {
            None
        } else if self.optional {
            Some(JobClass::Optional)
        } else if self.triggers_conditionally() {
            Some(JobClass::RequiredIfPresent)
        } else {
            Some(JobClass::Required)
        }
    }

    /// Classify the job's context for `branch`.
    ///
    /// Precedence: branch filter, then `skip_report`, then `optional`,
    /// then `always_run`; anything left is required if present.
    pub fn classify(&self, branch: &str) -> JobClass {
        if !self.could_run(branch) {
            return JobClass::Excluded;
        }
        self.reporting_class().unwrap_or(JobClass::Excluded)
    }
}
