//! Keeper context policy options, layered global -> org -> repo -> branch

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One layer of keeper context policy settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperContextPolicy {
    /// Contexts that are always required, on top of job-derived ones
    pub required_contexts: Vec<String>,
    /// Contexts required only when reported
    pub required_if_present_contexts: Vec<String>,
    /// Contexts that never block merge
    pub optional_contexts: Vec<String>,
    /// Ignore reported contexts the policy does not know about
    pub skip_unknown_contexts: Option<bool>,
    /// Also require the contexts listed in branch protection
    pub from_branch_protection: Option<bool>,
}

impl KeeperContextPolicy {
    /// Layer `child` on top of `self`: lists are unioned, booleans set in
    /// the child win.
    #[must_use]
    pub fn apply(&self, child: &Self) -> Self {
        Self {
            required_contexts: union(&self.required_contexts, &child.required_contexts),
            required_if_present_contexts: union(
                &self.required_if_present_contexts,
                &child.required_if_present_contexts,
            ),
            optional_contexts: union(&self.optional_contexts, &child.optional_contexts),
            skip_unknown_contexts: child.skip_unknown_contexts.or(self.skip_unknown_contexts),
            from_branch_protection: child
                .from_branch_protection
                .or(self.from_branch_protection),
        }
    }
}

fn union(parent: &[String], child: &[String]) -> Vec<String> {
    let mut merged = parent.to_vec();
    merged.extend(child.iter().filter(|c| !parent.contains(c)).cloned());
    merged
}

/// Repository-level keeper options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoContextPolicy {
    /// Defaults for every branch of the repository
    #[serde(flatten)]
    pub policy: KeeperContextPolicy,
    /// Per-branch overrides
    pub branches: HashMap<String, KeeperContextPolicy>,
}

/// Organization-level keeper options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgContextPolicy {
    /// Defaults for every repository of the organization
    #[serde(flatten)]
    pub policy: KeeperContextPolicy,
    /// Per-repository overrides
    pub repos: HashMap<String, RepoContextPolicy>,
}

/// Keeper context policy options for every organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextPolicyOptions {
    /// Global defaults
    #[serde(flatten)]
    pub policy: KeeperContextPolicy,
    /// Per-organization overrides
    pub orgs: HashMap<String, OrgContextPolicy>,
}

impl ContextPolicyOptions {
    /// Effective options for `org/repo@branch`
    pub fn resolve(&self, org: &str, repo: &str, branch: &str) -> ContextOptions {
        let mut policy = self.policy.clone();
        if let Some(o) = self.orgs.get(org) {
            policy = policy.apply(&o.policy);
            if let Some(r) = o.repos.get(repo) {
                policy = policy.apply(&r.policy);
                if let Some(b) = r.branches.get(branch) {
                    policy = policy.apply(b);
                }
            }
        }
        ContextOptions::from(policy)
    }
}

/// Resolved context policy options for one branch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOptions {
    /// Explicitly required contexts
    pub required_contexts: BTreeSet<String>,
    /// Explicitly required-if-present contexts
    pub required_if_present_contexts: BTreeSet<String>,
    /// Explicitly optional contexts
    pub optional_contexts: BTreeSet<String>,
    /// Ignore reported contexts the policy does not know about
    pub skip_unknown_contexts: bool,
    /// Also require the contexts listed in branch protection
    pub from_branch_protection: bool,
}

impl From<KeeperContextPolicy> for ContextOptions {
    fn from(policy: KeeperContextPolicy) -> Self {
        Self {
            required_contexts: policy.required_contexts.into_iter().collect(),
            required_if_present_contexts: policy
                .required_if_present_contexts
                .into_iter()
                .collect(),
            optional_contexts: policy.optional_contexts.into_iter().collect(),
            skip_unknown_contexts: policy.skip_unknown_contexts.unwrap_or(false),
            from_branch_protection: policy.from_branch_protection.unwrap_or(false),
        }
    }
}
