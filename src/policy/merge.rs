//! Reconciling job-derived contexts with options and branch protection

use super::{ContextOptions, JobPolicy};
use crate::error::{Error, Result};
use crate::types::ContextPolicy;
use std::collections::BTreeSet;

/// Combine the job-derived policy, resolved options and branch protection
/// contexts into the final [`ContextPolicy`].
///
/// Branch protection contexts are only used when
/// `options.from_branch_protection` is set. A context already produced by a
/// job keeps its classification; any other context becomes required,
/// whatever `skip_unknown_contexts` says. That flag is only carried on the
/// result for status evaluation.
pub fn merge_context_policy(
    job_policy: JobPolicy,
    options: &ContextOptions,
    branch_protection_contexts: &[String],
) -> Result<ContextPolicy> {
    let JobPolicy {
        mut required,
        mut required_if_present,
        mut optional,
    } = job_policy;

    required.extend(options.required_contexts.iter().cloned());
    required_if_present.extend(options.required_if_present_contexts.iter().cloned());
    optional.extend(options.optional_contexts.iter().cloned());

    if options.from_branch_protection {
        for context in branch_protection_contexts {
            let known = required.contains(context)
                || required_if_present.contains(context)
                || optional.contains(context);
            if !known {
                required.insert(context.clone());
            }
        }
    }

    let policy = ContextPolicy {
        required_contexts: required,
        required_if_present_contexts: required_if_present,
        optional_contexts: optional,
        skip_unknown_contexts: options.skip_unknown_contexts,
    };
    validate(&policy)?;
    Ok(policy)
}

/// Check that the three context sets are pairwise disjoint.
pub fn validate(policy: &ContextPolicy) -> Result<()> {
    let overlaps = [
        (
            "required",
            &policy.required_contexts,
            "required-if-present",
            &policy.required_if_present_contexts,
        ),
        (
            "required",
            &policy.required_contexts,
            "optional",
            &policy.optional_contexts,
        ),
        (
            "required-if-present",
            &policy.required_if_present_contexts,
            "optional",
            &policy.optional_contexts,
        ),
    ];

    let conflicts: Vec<String> = overlaps
        .iter()
        .filter_map(|(a_name, a, b_name, b)| {
            let common: BTreeSet<&String> = a.intersection(b).collect();
            if common.is_empty() {
                None
            } else {
                let names: Vec<&str> = common.into_iter().map(String::as_str).collect();
                Some(format!("{a_name} and {b_name}: {}", names.join(", ")))
            }
        })
        .collect();

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "contexts are configured in more than one category ({})",
            conflicts.join("; ")
        )))
    }
}
