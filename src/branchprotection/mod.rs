//! Host-side branch protection policy tree
//!
//! Policies are layered global -> org -> repo -> branch. Each layer may leave
//! fields unset to inherit them from its parent; see [`Policy::apply`].

mod resolve;

pub use resolve::resolve_required_contexts;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Required status checks declared by a branch protection layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequiredStatusChecks {
    /// Status context names that must pass
    pub contexts: Vec<String>,
    /// Require the branch to be up to date before merging
    pub strict: Option<bool>,
}

/// One layer of branch protection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Whether the branch is protected at all
    pub protect: Option<bool>,
    /// Required status checks
    pub required_status_checks: Option<RequiredStatusChecks>,
}

impl Policy {
    /// Layer `child` on top of `self`.
    ///
    /// Scalars set in the child win. Context lists are unioned, parent
    /// entries first, without duplicates. Unset child fields inherit.
    #[must_use]
    pub fn apply(&self, child: &Self) -> Self {
        Self {
            protect: child.protect.or(self.protect),
            required_status_checks: merge_status_checks(
                self.required_status_checks.as_ref(),
                child.required_status_checks.as_ref(),
            ),
        }
    }

    /// Required contexts declared by this policy (empty if none)
    pub fn contexts(&self) -> &[String] {
        self.required_status_checks
            .as_ref()
            .map(|checks| checks.contexts.as_slice())
            .unwrap_or_default()
    }

    /// Whether the policy declares any protection settings beyond `protect`
    pub const fn is_defined(&self) -> bool {
        self.required_status_checks.is_some()
    }
}

fn merge_status_checks(
    parent: Option<&RequiredStatusChecks>,
    child: Option<&RequiredStatusChecks>,
) -> Option<RequiredStatusChecks> {
    match (parent, child) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (Some(parent), Some(child)) => {
            let mut contexts = parent.contexts.clone();
            for context in &child.contexts {
                if !contexts.contains(context) {
                    contexts.push(context.clone());
                }
            }
            Some(RequiredStatusChecks {
                contexts,
                strict: child.strict.or(parent.strict),
            })
        }
    }
}

/// Branch-level protection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branch {
    /// Settings for this branch
    #[serde(flatten)]
    pub policy: Policy,
}

/// Repository-level protection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repo {
    /// Defaults for every branch of the repository
    #[serde(flatten)]
    pub policy: Policy,
    /// Per-branch overrides
    pub branches: HashMap<String, Branch>,
}

/// Organization-level protection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Org {
    /// Defaults for every repository of the organization
    #[serde(flatten)]
    pub policy: Policy,
    /// Per-repository overrides
    pub repos: HashMap<String, Repo>,
}

/// The whole branch protection tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchProtection {
    /// Defaults for every organization
    #[serde(flatten)]
    pub policy: Policy,
    /// Stay quiet about `protect = false` layers that still declare checks
    pub allow_disabled_policies: bool,
    /// Per-organization overrides
    pub orgs: HashMap<String, Org>,
}

impl BranchProtection {
    /// The layers that apply to `org/repo@branch`, most general first
    pub fn layers<'a>(&'a self, org: &str, repo: &str, branch: &str) -> Vec<&'a Policy> {
        let mut layers = vec![&self.policy];
        let Some(o) = self.orgs.get(org) else {
            return layers;
        };
        layers.push(&o.policy);
        let Some(r) = o.repos.get(repo) else {
            return layers;
        };
        layers.push(&r.policy);
        if let Some(b) = r.branches.get(branch) {
            layers.push(&b.policy);
        }
        layers
    }

    /// Fold every applicable layer into the effective policy
    pub fn effective_policy(&self, org: &str, repo: &str, branch: &str) -> Policy {
        self.layers(org, repo, branch)
            .into_iter()
            .fold(Policy::default(), |acc, layer| acc.apply(layer))
    }
}
