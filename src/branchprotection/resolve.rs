//! Resolving the host-required status checks for one branch

use super::BranchProtection;
use crate::error::{Error, Result};
use tracing::{debug, warn};

/// Resolve the required status check contexts for `org/repo@branch`.
///
/// Returns an empty list when no layer applies or when protection is
/// disabled. Fails only on blank context names.
pub fn resolve_required_contexts(
    tree: &BranchProtection,
    org: &str,
    repo: &str,
    branch: &str,
) -> Result<Vec<String>> {
    let layers = tree.layers(org, repo, branch);
    if layers
        .iter()
        .any(|layer| layer.contexts().iter().any(|c| c.trim().is_empty()))
    {
        return Err(Error::Config(format!(
            "branch protection for {org}/{repo}={branch} has a required status check with no name"
        )));
    }

    let policy = tree.effective_policy(org, repo, branch);

    if policy.protect == Some(false) {
        // the most specific layer that sets `protect`
        let disabling = layers.iter().rev().find(|layer| layer.protect.is_some());
        if disabling.is_some_and(|layer| layer.is_defined()) && !tree.allow_disabled_policies {
            warn!(
                org,
                repo,
                branch,
                "ignoring required status checks because protect is false"
            );
        }
        debug!(org, repo, branch, "branch protection disabled");
        return Ok(Vec::new());
    }

    let contexts = policy.contexts().to_vec();
    debug!(org, repo, branch, count = contexts.len(), "resolved branch protection contexts");
    Ok(contexts)
}
