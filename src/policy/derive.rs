//! Deriving context requirements from job definitions - pure, no I/O

use crate::job::Presubmit;
use crate::types::JobClass;
use std::collections::BTreeSet;

/// Contexts partitioned by how the jobs reporting them were classified
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPolicy {
    /// Always-run jobs
    pub required: BTreeSet<String>,
    /// Conditionally triggered jobs
    pub required_if_present: BTreeSet<String>,
    /// Optional jobs
    pub optional: BTreeSet<String>,
}

impl JobPolicy {
    /// Whether `context` is in any of the sets
    pub fn contains(&self, context: &str) -> bool {
        self.required.contains(context)
            || self.required_if_present.contains(context)
            || self.optional.contains(context)
    }
}

/// Partition the contexts of `jobs` for `branch`.
///
/// Jobs that do not apply to the branch or never report contribute
/// nothing; see [`Presubmit::classify`] for the precedence.
pub fn derive_job_policy(jobs: &[Presubmit], branch: &str) -> JobPolicy {
    let mut policy = JobPolicy::default();
    for job in jobs {
        let set = match job.classify(branch) {
            JobClass::Required => &mut policy.required,
            JobClass::RequiredIfPresent => &mut policy.required_if_present,
            JobClass::Optional => &mut policy.optional,
            JobClass::Excluded => continue,
        };
        set.insert(job.context.clone());
    }
    policy
}
