//! Context policy engine
//!
//! Three steps, all pure:
//! 1. Derive - partition job contexts for the branch (`derive_job_policy`)
//! 2. Resolve - host-required contexts from branch protection, if enabled
//! 3. Merge - reconcile both into a `ContextPolicy` (`merge_context_policy`)

mod derive;
mod merge;
mod options;

pub use derive::{JobPolicy, derive_job_policy};
pub use merge::{merge_context_policy, validate};
pub use options::{
    ContextOptions, ContextPolicyOptions, KeeperContextPolicy, OrgContextPolicy,
    RepoContextPolicy,
};

use crate::branchprotection::resolve_required_contexts;
use crate::config::Config;
use crate::error::Result;
use crate::types::ContextPolicy;
use tracing::debug;

impl Config {
    /// Compute the context policy for `org/repo@branch`.
    ///
    /// Branch protection is only consulted when the resolved options ask
    /// for it. The result is rebuilt on every call.
    pub fn context_policy(&self, org: &str, repo: &str, branch: &str) -> Result<ContextPolicy> {
        let options = self.context_options.resolve(org, repo, branch);
        let job_policy = derive_job_policy(self.jobs.presubmits(org, repo), branch);

        let branch_protection_contexts = if options.from_branch_protection {
            resolve_required_contexts(&self.branch_protection, org, repo, branch)?
        } else {
            Vec::new()
        };

        let policy = merge_context_policy(job_policy, &options, &branch_protection_contexts)?;
        debug!(
            org,
            repo,
            branch,
            generation = self.generation,
            required = policy.required_contexts.len(),
            required_if_present = policy.required_if_present_contexts.len(),
            optional = policy.optional_contexts.len(),
            "computed context policy"
        );
        Ok(policy)
    }
}
